use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    fs,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use sysinfo::System;

fn get_thread_count(pid: usize) -> Option<i64> {
    let contents = fs::read_to_string(format!("/proc/{pid}/status")).ok()?;

    contents
        .lines()
        .find(|line| line.starts_with("Threads:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|count| count.parse::<i64>().ok())
}

#[derive(Debug, Clone)]
pub struct SystemMetrics {
    pub memory_alloc_bytes: Gauge,
    pub memory_sys_bytes: Gauge,
    pub available_memory: Gauge,
    pub thread_usage: Gauge,
    pub cpu_usage_percent: Gauge,
    pub process_start_time: Gauge,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemMetrics {
    pub fn new() -> Self {
        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let metrics = Self {
            memory_alloc_bytes: Gauge::default(),
            memory_sys_bytes: Gauge::default(),
            available_memory: Gauge::default(),
            thread_usage: Gauge::default(),
            cpu_usage_percent: Gauge::default(),
            process_start_time: Gauge::default(),
        };

        metrics.process_start_time.set(start_time);
        metrics
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "process_memory_alloc_bytes",
            "Resident memory of the process in bytes",
            self.memory_alloc_bytes.clone(),
        );

        registry.register(
            "process_memory_sys_bytes",
            "Virtual memory of the process in bytes",
            self.memory_sys_bytes.clone(),
        );

        registry.register(
            "system_available_memory_kib",
            "Available system memory in KiB",
            self.available_memory.clone(),
        );

        registry.register(
            "process_thread_total",
            "Thread total",
            self.thread_usage.clone(),
        );

        registry.register(
            "system_cpu_usage_percent",
            "Global cpu usage",
            self.cpu_usage_percent.clone(),
        );

        registry.register(
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds",
            self.process_start_time.clone(),
        );
    }

    pub fn update_metrics(&self, sys: &mut System) {
        sys.refresh_all();

        let pid = std::process::id() as usize;

        if let Some(process) = sys.process(sysinfo::Pid::from(pid)) {
            self.memory_alloc_bytes.set(process.memory() as i64);
            self.memory_sys_bytes.set(process.virtual_memory() as i64);
        }

        self.available_memory
            .set((sys.available_memory() / 1_024) as i64);
        self.cpu_usage_percent.set(sys.global_cpu_usage() as i64);

        if let Some(thread_count) = get_thread_count(pid) {
            self.thread_usage.set(thread_count);
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub operation: String,
    pub status: Status,
}

/// Request counter and latency histogram shared by one service.
#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(
                    [0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0].into_iter(),
                )
            }),
        }
    }

    pub fn register(&self, registry: &mut Registry, prefix: &str, service: &str) {
        registry.register(
            format!("{prefix}_request_counter"),
            format!("Total number of requests to the {service}"),
            self.request_counter.clone(),
        );
        registry.register(
            format!("{prefix}_request_duration"),
            format!("Histogram of request durations for the {service}"),
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, method: Method, operation: &str, status: Status, duration_secs: f64) {
        let labels = Labels {
            method,
            operation: operation.to_string(),
            status,
        };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

pub async fn run_metrics_collector(system_metrics: Arc<SystemMetrics>) {
    let mut sys = System::new_all();
    let mut interval = tokio::time::interval(Duration::from_secs(15));
    loop {
        interval.tick().await;
        system_metrics.update_metrics(&mut sys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn record_increments_counter_per_label_set() {
        let metrics = Metrics::new();

        metrics.record(Method::Get, "find_one", Status::Success, 0.01);
        metrics.record(Method::Get, "find_one", Status::Success, 0.02);
        metrics.record(Method::Get, "find_one", Status::Error, 0.03);

        let ok = Labels {
            method: Method::Get,
            operation: "find_one".into(),
            status: Status::Success,
        };
        let failed = Labels {
            status: Status::Error,
            ..ok.clone()
        };

        assert_eq!(metrics.request_counter.get_or_create(&ok).get(), 2);
        assert_eq!(metrics.request_counter.get_or_create(&failed).get(), 1);
    }

    #[test]
    fn registered_metrics_are_encoded() {
        let mut registry = Registry::default();
        let metrics = Metrics::new();
        metrics.register(&mut registry, "order_item_service", "OrderItemService");
        metrics.record(Method::Post, "create", Status::Success, 0.2);

        let mut buffer = String::new();
        encode(&mut buffer, &registry).expect("encode registry");

        assert!(buffer.contains("order_item_service_request_counter_total"));
        assert!(buffer.contains("operation=\"create\""));
    }
}
