//! Text exposition of collected metrics for external scrapers.

use super::collector::MetricsCollector;
use super::resources::ResourceUsage;
use std::fmt::Write;

impl MetricsCollector {
    /// Renders all metrics in the Prometheus text format.
    #[must_use]
    pub fn render_prometheus(&self) -> String {
        let usage = ResourceUsage::sample();
        let stages = self.snapshot();
        let mut output = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(output, "# HELP mcp_requests_total Total requests processed");
        let _ = writeln!(output, "# TYPE mcp_requests_total counter");
        for m in &stages {
            let _ = writeln!(
                output,
                "mcp_requests_total{{agent=\"{}\",status=\"success\"}} {}",
                m.agent_name,
                m.success_count()
            );
            let _ = writeln!(
                output,
                "mcp_requests_total{{agent=\"{}\",status=\"error\"}} {}",
                m.agent_name, m.error_count
            );
        }

        let _ = writeln!(output, "# HELP mcp_request_duration_seconds Request processing time");
        let _ = writeln!(output, "# TYPE mcp_request_duration_seconds summary");
        for m in &stages {
            let _ = writeln!(
                output,
                "mcp_request_duration_seconds_sum{{agent=\"{}\"}} {}",
                m.agent_name, m.total_processing_time
            );
            let _ = writeln!(
                output,
                "mcp_request_duration_seconds_count{{agent=\"{}\"}} {}",
                m.agent_name, m.requests_processed
            );
        }

        let _ = writeln!(output, "# HELP mcp_active_agents Number of active agents");
        let _ = writeln!(output, "# TYPE mcp_active_agents gauge");
        let _ = writeln!(output, "mcp_active_agents {}", self.active_agents());

        let _ = writeln!(output, "# HELP mcp_memory_bytes Memory usage in bytes");
        let _ = writeln!(output, "# TYPE mcp_memory_bytes gauge");
        let _ = writeln!(output, "mcp_memory_bytes {}", usage.rss_bytes);

        let _ = writeln!(output, "# HELP mcp_cpu_percent CPU usage percentage");
        let _ = writeln!(output, "# TYPE mcp_cpu_percent gauge");
        let _ = writeln!(output, "mcp_cpu_percent {:.2}", usage.cpu_percent);

        let _ = writeln!(output, "# HELP mcp_uptime_seconds Seconds since start");
        let _ = writeln!(output, "# TYPE mcp_uptime_seconds gauge");
        let _ = writeln!(output, "mcp_uptime_seconds {:.3}", self.uptime().as_secs_f64());

        output
    }
}
