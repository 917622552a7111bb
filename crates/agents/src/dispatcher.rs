use std::sync::Arc;

use futures::future::join_all;
use insure_core::{classify_intent, normalize_text, InboundEvent, OutboundMessage};
use insure_observability::AppMetrics;
use tokio::task::JoinError;
use tracing::{error, info, instrument, warn, Instrument};

use crate::channel::{GenerationBackend, ReplyChannel};
use crate::composer::ResponseComposer;

pub type DispatchOutcome = Option<Vec<OutboundMessage>>;

pub struct EventDispatcher<C, B> {
    channel: C,
    composer: ResponseComposer<B>,
    metrics: Arc<AppMetrics>,
}

impl<C, B> EventDispatcher<C, B>
where
    C: ReplyChannel,
    B: GenerationBackend,
{
    pub fn new(channel: C, composer: ResponseComposer<B>, metrics: Arc<AppMetrics>) -> Self {
        Self {
            channel,
            composer,
            metrics,
        }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn composer(&self) -> &ResponseComposer<B> {
        &self.composer
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    // Each event runs on its own task, so dropping the returned future (a caller that
    // disconnects mid-request) does not cancel replies already in flight.
    pub async fn handle_batch(self: Arc<Self>, events: Vec<InboundEvent>) -> Vec<DispatchOutcome>
    where
        C: 'static,
        B: 'static,
    {
        let tasks: Vec<_> = events
            .into_iter()
            .map(|event| {
                let dispatcher = Arc::clone(&self);
                let task = async move { dispatcher.handle(&event).await };
                tokio::spawn(task.in_current_span())
            })
            .collect();

        let outcomes = join_all(tasks).await;
        outcomes.into_iter().map(task_outcome).collect()
    }

    #[instrument(skip_all, fields(sender = event.sender_id.as_deref()))]
    pub async fn handle(&self, event: &InboundEvent) -> DispatchOutcome {
        self.metrics.inc_event();

        if !event.is_text_message() {
            self.metrics.inc_ignored();
            return None;
        }

        let Some(reply_token) = event.reply_token.as_deref() else {
            self.metrics.inc_ignored();
            warn!("text message without reply token, nothing to reply to");
            return None;
        };

        let text = normalize_text(&event.text);
        info!(text = %text, "received message");

        let intent = classify_intent(&text);
        let messages = self.composer.compose(intent, &text).await;

        match self.channel.send(reply_token, &messages).await {
            Ok(()) => {
                self.metrics.inc_delivered();
                info!(
                    intent = intent.as_code(),
                    messages = messages.len(),
                    "reply delivered"
                );
                Some(messages)
            }
            Err(err) if err.is_auth_failure() => {
                self.metrics.inc_delivery_auth_failure();
                error!(
                    error = %err,
                    "reply channel token error: channel access token may be expired or invalid"
                );
                None
            }
            Err(err) => {
                self.metrics.inc_delivery_failure();
                error!(error = %err, "failed to deliver reply");
                None
            }
        }
    }
}

fn task_outcome(joined: Result<DispatchOutcome, JoinError>) -> DispatchOutcome {
    joined.unwrap_or_else(|err| {
        error!(error = %err, "event task ended without an outcome");
        None
    })
}
