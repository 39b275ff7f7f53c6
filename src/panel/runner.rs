use crate::config::{PanelConfig, PanelKind};
use crate::market::asset::AssetList;
use crate::market::request::AssetListRequest;
use crate::panel::carousel::Carousel;
use crate::panel::render::PanelView;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, trace, warn};

#[derive(Debug, Clone)]
pub struct PanelUpdate {
    pub panel: String,
    pub kind: PanelKind,
    pub view: PanelView,
}

/// A displayed panel. Both timers and any in-flight request live as long as
/// the handle: `teardown` stops them and waits, dropping the handle stops
/// them without waiting.
#[derive(Debug)]
pub struct PanelHandle {
    name: String,
    stop_signal_send: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PanelHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn teardown(mut self) {
        if let Some(stop_signal) = self.stop_signal_send.take() {
            info!("Sending stop signal to panel: {}", self.name);
            if stop_signal.send(()).is_err() {
                warn!("Panel {} already stopped", self.name);
            }
        }

        if let Some(task) = self.task.take() {
            join_task(&format!("Panel {}", self.name), task).await;
        }
    }
}

// logs a panicked or cancelled task, returns whether it ran to completion
pub async fn join_task(what: &str, task: JoinHandle<()>) -> bool {
    match task.await {
        Ok(()) => true,
        Err(e) => {
            error!("{} task failed: {}", what, e);
            false
        }
    }
}

pub fn spawn_panel(
    panel_config: PanelConfig,
    job_sender: mpsc::UnboundedSender<AssetListRequest>,
    view_sender: mpsc::UnboundedSender<PanelUpdate>,
) -> PanelHandle {
    let (stop_signal_send, stop_signal_recv) = oneshot::channel();
    let name = panel_config.name.clone();

    trace!("Spawning task for panel: {}", name);
    let task = tokio::spawn(async move {
        run_panel_loop(panel_config, stop_signal_recv, job_sender, view_sender).await;
    });

    PanelHandle {
        name,
        stop_signal_send: Some(stop_signal_send),
        task: Some(task),
    }
}

#[instrument(skip_all, fields(panel = %panel_config.name))]
async fn run_panel_loop(
    panel_config: PanelConfig,
    mut stop_signal_recv: oneshot::Receiver<()>,
    job_sender: mpsc::UnboundedSender<AssetListRequest>,
    view_sender: mpsc::UnboundedSender<PanelUpdate>,
) {
    let refresh_duration = Duration::from_secs(panel_config.refresh_secs());
    let rotate_duration = Duration::from_secs(panel_config.rotate_secs());

    // first refresh fires immediately, first rotation one period later
    let mut refresh_timer = time::interval(refresh_duration);
    refresh_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut rotate_timer = time::interval_at(Instant::now() + rotate_duration, rotate_duration);
    rotate_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut carousel = Carousel::new(panel_config.page_size());
    let mut assets: Option<AssetList> = None;
    let mut in_flight: Option<oneshot::Receiver<AssetList>> = None;

    let emit = |assets: Option<&AssetList>, carousel: &Carousel| {
        view_sender.send(PanelUpdate {
            panel: panel_config.name.clone(),
            kind: panel_config.kind,
            view: PanelView::render(assets, carousel),
        })
    };

    if emit(None, &carousel).is_err() {
        warn!("View receiver is closed before first render, stopping");
        return;
    }

    loop {
        tokio::select! {
            biased;

            _ = &mut stop_signal_recv => {
                info!("Stop signal received for {}, quit loop", panel_config.name);
                break;
            }

            reply = async {
                match in_flight.as_mut() {
                    Some(resp_receiver) => resp_receiver.await,
                    None => std::future::pending().await,
                }
            }, if in_flight.is_some() => {
                in_flight = None;
                match reply {
                    Ok(list) => {
                        debug!(
                            "Received {} assets ({:?}) for {}",
                            list.len(), list.source, panel_config.name
                        );
                        assets = Some(list);
                    }
                    Err(_) => {
                        warn!(
                            "Asset list reply for {} was dropped, will retry on next refresh",
                            panel_config.name
                        );
                        continue;
                    }
                }
            }

            _ = refresh_timer.tick() => {
                if in_flight.is_some() {
                    debug!("Fetch for {} still in flight, skip this refresh", panel_config.name);
                    continue;
                }

                let (resp_sender, resp_receiver) = oneshot::channel();
                let request = AssetListRequest {
                    panel: panel_config.name.clone(),
                    limit: panel_config.limit(),
                    resp_sender,
                };
                if let Err(e) = job_sender.send(request) {
                    error!(
                        "cannot send asset list request to channel for {}, stopping: {}",
                        panel_config.name, e
                    );
                    break;
                }
                in_flight = Some(resp_receiver);
                continue;
            }

            _ = rotate_timer.tick() => {
                match assets.as_ref() {
                    Some(list) if !list.is_empty() => carousel.advance(list.len()),
                    _ => continue,
                }
            }
        }

        if emit(assets.as_ref(), &carousel).is_err() {
            warn!("View receiver for {} is closed, stopping", panel_config.name);
            break;
        }
    }
}
