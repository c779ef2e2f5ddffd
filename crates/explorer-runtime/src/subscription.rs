use crate::event::TerminalEvent;
use crossterm::event::EventStream;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A long-lived event source declared by [`Model::subscriptions`](crate::Model::subscriptions).
///
/// The runtime keeps one task per [`SubscriptionId`].  Returning the same id
/// on the next cycle keeps the task alive; dropping it aborts the task.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>,
}

/// Identity used to diff subscriptions between update cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// Singleton id for marker type `T`.
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }

    /// Id for marker type `T` with a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Forward every item of `stream` to the model.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            spawn: Box::new(move |tx| {
                let handle = tokio::spawn(forward(stream, tx));
                handle.abort_handle()
            }),
        }
    }

    /// The id this subscription is diffed by.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }
}

async fn forward<Msg: Send + 'static>(
    mut stream: BoxStream<'static, Msg>,
    tx: mpsc::UnboundedSender<Msg>,
) {
    while let Some(msg) = stream.next().await {
        if tx.send(msg).is_err() {
            break;
        }
    }
}

struct TerminalEvents;

/// Subscribe to terminal input, mapping each event through `map`.
///
/// Return `None` from `map` to drop an event.  The crossterm `EventStream`
/// is created inside the spawned task, so calling this on every update cycle
/// does not touch the terminal until the subscription actually starts.
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| {
            let handle = tokio::spawn(async move {
                let stream = EventStream::new().filter_map(move |result| {
                    let map = map.clone();
                    async move {
                        match result {
                            Ok(event) => TerminalEvent::from_crossterm(event).and_then(|e| map(e)),
                            Err(err) => {
                                tracing::warn!(error = %err, "terminal event stream error");
                                None
                            }
                        }
                    }
                });
                forward(Box::pin(stream), tx).await;
            });
            handle.abort_handle()
        }),
    }
}

/// Starts and stops subscription tasks as the model's declared set changes.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    pub fn reconcile(&mut self, subs: Vec<Subscription<Msg>>) {
        let mut wanted: HashMap<SubscriptionId, Subscription<Msg>> =
            subs.into_iter().map(|s| (s.id.clone(), s)).collect();

        self.active.retain(|id, handle| {
            let keep = wanted.contains_key(id);
            if !keep {
                tracing::debug!(?id, "stopping subscription");
                handle.abort();
            }
            keep
        });

        for (id, sub) in wanted.drain() {
            if !self.active.contains_key(&id) {
                tracing::debug!(?id, "starting subscription");
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
