//! Counting mail relay for `/email` tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use sketchboard::backend::mail::relay::RelayError;
use sketchboard::backend::{MailRelay, OutgoingMail};

#[derive(Default)]
pub struct CountingRelay {
    sends: AtomicUsize,
    last: Mutex<Option<OutgoingMail>>,
}

impl CountingRelay {
    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<OutgoingMail> {
        self.last.lock().unwrap().clone()
    }
}

impl MailRelay for CountingRelay {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<(), RelayError>> {
        async move {
            self.sends.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(mail);
            Ok(())
        }
        .boxed()
    }
}
