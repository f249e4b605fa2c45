use std::{future::Future, time::Duration};

use crate::contact::form::ContactMessage;

/// Delivers a validated contact message.
pub trait Submitter {
    fn send(&self, message: &ContactMessage) -> impl Future<Output = anyhow::Result<()>>;
}

/// Stand-in transport: waits, logs and succeeds.
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Submitter for SimulatedSubmitter {
    async fn send(&self, message: &ContactMessage) -> anyhow::Result<()> {
        log::info!(
            "Sending contact message from {} <{}>: {}",
            message.name,
            message.email,
            message.subject
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
