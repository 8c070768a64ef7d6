//! Metric logger trait.

use std::collections::BTreeMap;

use crate::env::EnvInfo;

/// Trait for logging metrics to various backends.
pub trait MetricLogger: Send + Sync {
    /// Log a scalar value (e.g. episode return).
    fn log_scalar(&self, name: &str, value: f64, step: u64);

    /// Log a set of named metrics for the same step.
    fn log_metrics(&self, metrics: &BTreeMap<String, f64>, step: u64);

    /// Log the end-of-episode summary carried by `info`, if there is one.
    fn log_episode(&self, info: &EnvInfo, episode: u64) {
        let metrics = episode_metrics(info);
        if !metrics.is_empty() {
            self.log_metrics(&metrics, episode);
        }
    }

    /// Close the logger and flush any pending writes.
    fn close(&self) {}
}

/// Collect the episode-level entries of `info` into a metric map
pub fn episode_metrics(info: &EnvInfo) -> BTreeMap<String, f64> {
    let mut metrics = BTreeMap::new();
    for key in ["episode_return", "episode_length", "ep_sparse_r", "ep_shaped_r", "ep_length"] {
        if let Some(v) = info.get(key) {
            metrics.insert(key.to_string(), v as f64);
        }
    }
    for (key, v) in &info.extra {
        metrics.insert(key.to_string(), *v as f64);
    }
    if let Some(episode) = &info.episode {
        for (i, (sparse, shaped)) in episode
            .ep_sparse_r_by_agent
            .iter()
            .zip(&episode.ep_shaped_r_by_agent)
            .enumerate()
        {
            metrics.insert(format!("agent_{}/ep_sparse_r", i), *sparse as f64);
            metrics.insert(format!("agent_{}/ep_shaped_r", i), *shaped as f64);
        }
    }
    metrics
}

/// A logger that does nothing (default).
pub struct NoOpLogger;

impl MetricLogger for NoOpLogger {
    fn log_scalar(&self, _name: &str, _value: f64, _step: u64) {}
    fn log_metrics(&self, _metrics: &BTreeMap<String, f64>, _step: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EpisodeInfo;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(u64, BTreeMap<String, f64>)>>,
    }

    impl MetricLogger for Recorder {
        fn log_scalar(&self, name: &str, value: f64, step: u64) {
            let mut m = BTreeMap::new();
            m.insert(name.to_string(), value);
            self.log_metrics(&m, step);
        }

        fn log_metrics(&self, metrics: &BTreeMap<String, f64>, step: u64) {
            self.calls.lock().unwrap().push((step, metrics.clone()));
        }
    }

    #[test]
    fn test_episode_metrics() {
        let info = EnvInfo::new()
            .with_episode(EpisodeInfo {
                ep_sparse_r: 20.0,
                ep_shaped_r: 11.0,
                ep_sparse_r_by_agent: vec![20.0, 0.0],
                ep_shaped_r_by_agent: vec![3.0, 8.0],
                ep_length: 400,
            })
            .with_episode_stats(20.0, 400)
            .with_extra("soups_delivered", 1.0);

        let metrics = episode_metrics(&info);
        assert_eq!(metrics["ep_sparse_r"], 20.0);
        assert_eq!(metrics["episode_length"], 400.0);
        assert_eq!(metrics["agent_1/ep_shaped_r"], 8.0);
        assert_eq!(metrics["soups_delivered"], 1.0);
    }

    #[test]
    fn test_log_episode_skips_mid_episode_info() {
        let logger = Recorder::default();
        logger.log_episode(&EnvInfo::new(), 0);
        assert!(logger.calls.lock().unwrap().is_empty());

        logger.log_episode(&EnvInfo::new().with_episode_stats(5.0, 10), 3);
        let calls = logger.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 3);
        assert_eq!(calls[0].1["episode_return"], 5.0);
    }
}
