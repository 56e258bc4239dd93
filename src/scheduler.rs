use crate::bus::{PortHandle, Transport};
use crate::config::PollSettings;
use crate::sensor::VisionSensor;
use std::future::Future;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Counters for one run of the polling loop
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PollSummary {
    pub port: Option<PortHandle>,
    pub polls: u64,
    pub detections: u64,
    pub errors: u64,
}

/// Locate the first vision sensor and poll it for objects until `shutdown` completes.
///
/// Bus failures are logged and polling continues on the next tick.
pub async fn run_object_poll<T, F>(
    sensor: &mut VisionSensor<T>,
    settings: &PollSettings,
    shutdown: F,
) -> PollSummary
where
    T: Transport,
    F: Future<Output = ()>,
{
    let mut summary = PollSummary::default();

    let Some(port) = sensor.find_first_sensor() else {
        warn!("[poll] no vision sensor");
        return summary;
    };
    summary.port = Some(port);

    let interval = settings.interval();
    info!("[poll] using {}, signature {} every {:?}", port, settings.signature, interval);

    tokio::pin!(shutdown);
    loop {
        summary.polls += 1;
        match sensor.get_objects(port, settings.signature, settings.max_objects) {
            Ok(objects) if !objects.is_empty() => {
                summary.detections += 1;
                info!("[poll] found {} object(s)", objects.len());
                for (i, obj) in objects.iter().enumerate() {
                    info!(
                        "[poll] {}: id={} x={} y={} w={} h={}",
                        i, obj.signature_id, obj.x, obj.y, obj.width, obj.height
                    );
                }
                if let Ok(json) = objects.to_json() {
                    debug!("[poll] {}", json);
                }
            }
            Ok(_) => info!("[poll] no objects found"),
            Err(e) => {
                summary.errors += 1;
                warn!("[poll] object query failed: {}", e);
            }
        }

        tokio::select! {
            _ = &mut shutdown => break,
            _ = sleep(interval) => {}
        }
    }

    info!("[poll] stopped after {} poll(s)", summary.polls);
    summary
}
