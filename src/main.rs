use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

use dpc_portal::backend::BackendClient;
use dpc_portal::config::AppConfig;
use dpc_portal::directory::{directory_router, DirectoryCatalog};
use dpc_portal::error::AppError;
use dpc_portal::messaging::{
    messaging_router, CannedResponder, Contact, ContactRole, MessageCenter,
};
use dpc_portal::roster::{self, roster_router, EmployeeRecord, InMemoryRoster};
use dpc_portal::telemetry;
use dpc_portal::workflows::enrollment::{
    enrollment_router, quote, CoverageStructure, DraftUpdate, EligibilityExclusions,
    EmployeeCategory, EnrollmentDraft, EnrollmentPath, EnrollmentService, FamilyTier,
    InMemoryDraftRepository, MembershipTier, QuoteBreakdown, RateCard, TierContributions,
};

const DEMO_EMPLOYER_ID: &str = "emp-001";

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "DPC Benefits Portal",
    about = "Serve the benefits portal or run enrollment demos from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run enrollment flows without the HTTP surface
    Enrollment {
        #[command(subcommand)]
        command: EnrollmentCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum EnrollmentCommand {
    /// Price an enrollment against a roster and print the breakdown
    Quote(QuoteArgs),
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Roster CSV in the portal template format (defaults to a built-in
    /// sample roster)
    #[arg(long)]
    roster_csv: Option<PathBuf>,
    /// Flat monthly employer contribution per covered employee
    #[arg(long, default_value_t = 120)]
    contribution: u32,
    /// Exclude part-time employees from coverage
    #[arg(long)]
    exclude_part_time: bool,
    /// Exclude temporary employees from coverage
    #[arg(long)]
    exclude_temporary: bool,
    /// Exclude contract employees from coverage
    #[arg(long)]
    exclude_contract: bool,
    /// Print the wizard steps visited while assembling the quote
    #[arg(long)]
    walk_through: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Enrollment {
            command: EnrollmentCommand::Quote(args),
        } => run_enrollment_quote(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let drafts = Arc::new(InMemoryDraftRepository::default());
    let employees = Arc::new(InMemoryRoster::with_employees(
        DEMO_EMPLOYER_ID,
        sample_roster(),
    ));
    let gateway = Arc::new(BackendClient::from_config(&config.backend)?);
    let enrollment = Arc::new(EnrollmentService::new(
        drafts,
        employees.clone(),
        gateway,
        RateCard::standard(),
    ));

    let catalog = Arc::new(DirectoryCatalog::seeded());
    let center = Arc::new(MessageCenter::new(demo_contacts(), CannedResponder));
    seed_messages(&center);

    let ops = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state);

    let app = ops
        .merge(enrollment_router(enrollment))
        .merge(directory_router(catalog))
        .merge(messaging_router(center))
        .merge(roster_router(employees))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "benefits portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_enrollment_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        roster_csv,
        contribution,
        exclude_part_time,
        exclude_temporary,
        exclude_contract,
        walk_through,
    } = args;

    let imported = roster_csv.is_some();
    let employees = match roster_csv {
        Some(path) => roster::from_path(path)?,
        None => sample_roster(),
    };

    let exclusions = EligibilityExclusions {
        part_time: exclude_part_time,
        temporary: exclude_temporary,
        contract: exclude_contract,
    };
    let custom = exclude_part_time || exclude_temporary || exclude_contract;
    let structure = if custom {
        CoverageStructure::Custom
    } else {
        CoverageStructure::SameForAll
    };

    let mut draft = EnrollmentDraft::new(DEMO_EMPLOYER_ID);
    let mut visited = vec![draft.step().label()];

    draft.apply(DraftUpdate::CoverageStructure { structure })?;
    visited.push(draft.advance()?.label());

    draft.apply(DraftUpdate::ContributionDetails {
        flat_monthly: Some(contribution),
        tiers: TierContributions::default(),
    })?;
    visited.push(draft.advance()?.label());

    if custom {
        draft.apply(DraftUpdate::EligibilityExclusions { exclusions })?;
        visited.push(draft.advance()?.label());
    }

    draft.apply(DraftUpdate::PartnerSelection {
        path: EnrollmentPath::Provider {
            provider_id: "prov-001".to_string(),
        },
    })?;
    visited.push(draft.advance()?.label());

    let schedule = draft.contribution_schedule()?;
    let breakdown = quote(
        &employees,
        &schedule,
        draft.exclusions(),
        &RateCard::standard(),
    );

    render_quote(&breakdown, employees.len(), imported);

    if walk_through {
        println!("\nWizard steps visited");
        for step in visited {
            println!("- {step}");
        }
    }

    Ok(())
}

fn render_quote(breakdown: &QuoteBreakdown, roster_size: usize, imported: bool) {
    println!("Enrollment quote demo");

    if imported {
        println!("Data source: roster CSV import");
    } else {
        println!("Data source: built-in sample roster");
    }

    println!(
        "Roster: {} employees ({} covered, {} excluded)",
        roster_size, breakdown.covered_employees, breakdown.excluded_employees
    );
    println!("\nMonthly total: ${}", breakdown.monthly_total);
    println!("- Employer share: ${}", breakdown.employer_monthly);
    println!("- Employee share: ${}", breakdown.employee_monthly);
    println!("Annual total: ${}", breakdown.annual_total);
}

fn sample_roster() -> Vec<EmployeeRecord> {
    let mut employees = Vec::new();

    let full_time: [(&str, &str, MembershipTier, FamilyTier); 6] = [
        ("e-1001", "Jordan Avery", MembershipTier::Standard, FamilyTier::EmployeeOnly),
        ("e-1002", "Riley Chen", MembershipTier::Standard, FamilyTier::EmployeeSpouse),
        ("e-1003", "Sam Ortiz", MembershipTier::Premium, FamilyTier::Family),
        ("e-1004", "Casey Nguyen", MembershipTier::Basic, FamilyTier::EmployeeOnly),
        ("e-1005", "Drew Patel", MembershipTier::Premium, FamilyTier::Family),
        ("e-1006", "Harper Liu", MembershipTier::Standard, FamilyTier::EmployeeOnly),
    ];
    for (id, name, membership, family) in full_time {
        employees.push(EmployeeRecord {
            employee_id: id.to_string(),
            name: name.to_string(),
            category: EmployeeCategory::FullTime,
            family_tier: family,
            membership_tier: membership,
            dependents: match family {
                FamilyTier::EmployeeOnly => 0,
                FamilyTier::EmployeeSpouse => 1,
                FamilyTier::Family => 3,
            },
        });
    }

    employees.push(EmployeeRecord {
        employee_id: "e-2001".to_string(),
        name: "Quinn Barnes".to_string(),
        category: EmployeeCategory::PartTime,
        family_tier: FamilyTier::EmployeeOnly,
        membership_tier: MembershipTier::Basic,
        dependents: 0,
    });
    employees.push(EmployeeRecord {
        employee_id: "e-2002".to_string(),
        name: "Rowan Fisher".to_string(),
        category: EmployeeCategory::Temporary,
        family_tier: FamilyTier::EmployeeOnly,
        membership_tier: MembershipTier::Basic,
        dependents: 0,
    });
    employees.push(EmployeeRecord {
        employee_id: "e-2003".to_string(),
        name: "Ellis Romero".to_string(),
        category: EmployeeCategory::Contract,
        family_tier: FamilyTier::EmployeeSpouse,
        membership_tier: MembershipTier::Standard,
        dependents: 1,
    });

    employees
}

fn demo_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: "brok-001".to_string(),
            name: "Alex Morrow".to_string(),
            role: ContactRole::Broker {
                company: "Heartland Benefits Group".to_string(),
            },
        },
        Contact {
            id: "prov-001".to_string(),
            name: "Dr. Maya Singh".to_string(),
            role: ContactRole::Provider {
                practice_name: "Lakeside Direct Care".to_string(),
            },
        },
        Contact {
            id: "emp-002".to_string(),
            name: "Taylor Brooks".to_string(),
            role: ContactRole::Employer {
                company: "Brooks Manufacturing".to_string(),
            },
        },
    ]
}

fn seed_messages(center: &MessageCenter<CannedResponder>) {
    center
        .record_inbound(
            "brok-001",
            "Welcome aboard! Let me know when you want to review plan options.",
        )
        .expect("seed contact exists");
    center
        .record_inbound(
            "prov-001",
            "Our October onboarding slots for new member panels are open.",
        )
        .expect("seed contact exists");
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
