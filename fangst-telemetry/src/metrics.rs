//! Prometheus metrics for the recording pipeline.
//!
//! Aggregate counters across all workers; the per-worker `WriterStats`
//! record remains the authoritative per-core view. Exposed in the text
//! exposition format via [`MetricsRecorder::gather_metrics`].

use prometheus::{Counter, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: prometheus::Registry,
    pub recorded_packets: prometheus::Counter,
    pub file_rotations: prometheus::Counter,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let recorded_packets = Counter::new(
            "fangst_packets_recorded_total",
            "Total packets written to capture files",
        )
        .unwrap();
        let file_rotations = Counter::new(
            "fangst_file_rotations_total",
            "Total capture file rotations across workers",
        )
        .unwrap();

        registry.register(Box::new(recorded_packets.clone())).unwrap();
        registry.register(Box::new(file_rotations.clone())).unwrap();

        Self {
            registry,
            recorded_packets,
            file_rotations,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    pub fn inc_recorded_packets(&self) {
        self.recorded_packets.inc();
    }

    pub fn inc_file_rotations(&self) {
        self.file_rotations.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_appear_in_exposition() {
        let metrics = MetricsRecorder::new();
        metrics.inc_recorded_packets();
        metrics.inc_file_rotations();

        let output = metrics.gather_metrics().unwrap();
        assert!(output.contains("fangst_packets_recorded_total 1"));
        assert!(output.contains("fangst_file_rotations_total 1"));
    }
}
