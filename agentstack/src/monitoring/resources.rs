//! Host resource sampling.
//!
//! On Linux the values come from `/proc/self`; elsewhere they read as zero.

/// Memory and CPU usage of the current process.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResourceUsage {
    /// Resident set size in bytes.
    pub rss_bytes: u64,
    /// Average CPU usage since process start, in percent of one core.
    pub cpu_percent: f64,
}

impl ResourceUsage {
    /// Samples the current process.
    #[must_use]
    pub fn sample() -> Self {
        #[cfg(target_os = "linux")]
        {
            linux::sample().unwrap_or_default()
        }
        #[cfg(not(target_os = "linux"))]
        {
            Self::default()
        }
    }

    /// Returns resident memory in MiB.
    #[must_use]
    pub fn memory_mb(&self) -> f64 {
        self.rss_bytes as f64 / 1024.0 / 1024.0
    }
}

#[cfg(target_os = "linux")]
mod linux {
    use super::ResourceUsage;

    // USER_HZ is 100 on every mainstream Linux configuration.
    const CLOCK_TICKS_PER_SECOND: f64 = 100.0;

    pub(super) fn sample() -> Option<ResourceUsage> {
        let rss_bytes = resident_bytes()?;
        let cpu_percent = cpu_percent().unwrap_or(0.0);
        Some(ResourceUsage {
            rss_bytes,
            cpu_percent,
        })
    }

    fn resident_bytes() -> Option<u64> {
        let status = std::fs::read_to_string("/proc/self/status").ok()?;
        let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
        let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
        Some(kb * 1024)
    }

    fn cpu_percent() -> Option<f64> {
        let stat = std::fs::read_to_string("/proc/self/stat").ok()?;
        // Fields after the parenthesised command name; it may contain spaces.
        let rest = stat.get(stat.rfind(')')? + 2..)?;
        let fields: Vec<&str> = rest.split_whitespace().collect();
        // utime, stime and starttime are fields 14, 15 and 22 of the full line.
        let utime: f64 = fields.get(11)?.parse().ok()?;
        let stime: f64 = fields.get(12)?.parse().ok()?;
        let start_ticks: f64 = fields.get(19)?.parse().ok()?;

        let uptime_raw = std::fs::read_to_string("/proc/uptime").ok()?;
        let system_uptime: f64 = uptime_raw.split_whitespace().next()?.parse().ok()?;

        let process_seconds = system_uptime - start_ticks / CLOCK_TICKS_PER_SECOND;
        if process_seconds <= 0.0 {
            return Some(0.0);
        }
        let cpu_seconds = (utime + stime) / CLOCK_TICKS_PER_SECOND;
        Some(cpu_seconds / process_seconds * 100.0)
    }
}
