use std::sync::Mutex;

use chrono::Utc;

use super::domain::{Contact, ContactSummary, Message, MessagingError, Sender};

/// Hook standing in for the messaging backend round trip. The demo
/// deployment answers with a canned acknowledgement; a real deployment
/// replaces this with an actual backend call.
pub trait AutoResponder: Send + Sync {
    fn reply_to(&self, contact: &Contact, inbound: &str) -> Option<String>;
}

/// Demo responder: every outbound message gets one canned reply.
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedResponder;

impl AutoResponder for CannedResponder {
    fn reply_to(&self, contact: &Contact, _inbound: &str) -> Option<String> {
        Some(format!(
            "Thanks for your message! {} will get back to you within one business day.",
            contact.name
        ))
    }
}

/// Responder that stays silent; used where no demo traffic is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentResponder;

impl AutoResponder for SilentResponder {
    fn reply_to(&self, _contact: &Contact, _inbound: &str) -> Option<String> {
        None
    }
}

struct ContactThread {
    contact: Contact,
    messages: Vec<Message>,
}

/// Contact list plus per-contact ordered threads. Messages only ever append;
/// ordering is append order.
pub struct MessageCenter<A> {
    threads: Mutex<Vec<ContactThread>>,
    responder: A,
}

impl<A: AutoResponder> MessageCenter<A> {
    pub fn new(contacts: Vec<Contact>, responder: A) -> Self {
        let threads = contacts
            .into_iter()
            .map(|contact| ContactThread {
                contact,
                messages: Vec::new(),
            })
            .collect();
        Self {
            threads: Mutex::new(threads),
            responder,
        }
    }

    /// Contact list in fixed order with thread previews.
    pub fn contacts(&self) -> Vec<ContactSummary> {
        let guard = self.threads.lock().expect("message mutex poisoned");
        guard
            .iter()
            .map(|thread| {
                let last_message = thread.messages.last().cloned();
                let unread = last_message
                    .as_ref()
                    .map(|message| !message.seen)
                    .unwrap_or(false);
                ContactSummary {
                    id: thread.contact.id.clone(),
                    name: thread.contact.name.clone(),
                    role: thread.contact.role.clone(),
                    last_message,
                    unread,
                }
            })
            .collect()
    }

    /// Open a thread: returns its messages and marks them seen.
    pub fn thread(&self, contact_id: &str) -> Result<Vec<Message>, MessagingError> {
        let mut guard = self.threads.lock().expect("message mutex poisoned");
        let thread = find_thread(&mut guard, contact_id)?;
        for message in &mut thread.messages {
            message.seen = true;
        }
        Ok(thread.messages.clone())
    }

    /// Append one outbound message (already seen by its author) and, when the
    /// responder answers, one unseen contact reply. Returns the full thread.
    pub fn send(&self, contact_id: &str, body: &str) -> Result<Vec<Message>, MessagingError> {
        let mut guard = self.threads.lock().expect("message mutex poisoned");
        let thread = find_thread(&mut guard, contact_id)?;

        thread.messages.push(Message {
            sender: Sender::You,
            body: body.to_string(),
            sent_at: Utc::now(),
            seen: true,
        });

        if let Some(reply) = self.responder.reply_to(&thread.contact, body) {
            thread.messages.push(Message {
                sender: Sender::Contact,
                body: reply,
                sent_at: Utc::now(),
                seen: false,
            });
        }

        Ok(thread.messages.clone())
    }

    /// Record an inbound contact message (seed data or backend pushes).
    pub fn record_inbound(&self, contact_id: &str, body: &str) -> Result<(), MessagingError> {
        let mut guard = self.threads.lock().expect("message mutex poisoned");
        let thread = find_thread(&mut guard, contact_id)?;
        thread.messages.push(Message {
            sender: Sender::Contact,
            body: body.to_string(),
            sent_at: Utc::now(),
            seen: false,
        });
        Ok(())
    }
}

fn find_thread<'a>(
    threads: &'a mut Vec<ContactThread>,
    contact_id: &str,
) -> Result<&'a mut ContactThread, MessagingError> {
    threads
        .iter_mut()
        .find(|thread| thread.contact.id == contact_id)
        .ok_or_else(|| MessagingError::ContactNotFound(contact_id.to_string()))
}
