use indexmap::IndexMap;
use std::time::Duration;

/// Wall times collected for one step, across every iteration.
#[derive(Debug, Default, Clone)]
pub struct StepTimings {
    pub wall_times: Vec<Duration>,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct Stats {
    pub total_tasks: usize,
    pub successful_tasks: usize,
    pub failed_tasks: usize,
    pub median: Option<Duration>,
    pub percentile_99: Option<Duration>,
    pub std_deviation: Option<Duration>,
    pub min: Option<Duration>,
    pub max: Option<Duration>,
}

impl Stats {
    pub fn calculate(mut durations: Vec<Duration>) -> Self {
        let total_tasks = durations.len();

        if durations.is_empty() {
            return Stats {
                total_tasks: 0,
                successful_tasks: 0,
                failed_tasks: 0,
                median: None,
                percentile_99: None,
                std_deviation: None,
                min: None,
                max: None,
            };
        }

        durations.sort();

        Stats {
            total_tasks,
            successful_tasks: total_tasks,
            failed_tasks: 0,
            median: Some(calculate_percentile(&durations, 50.0)),
            percentile_99: Some(calculate_percentile(&durations, 99.0)),
            std_deviation: Some(calculate_std_deviation(&durations)),
            min: durations.first().copied(),
            max: durations.last().copied(),
        }
    }

    pub fn with_failed_count(mut self, failed: usize) -> Self {
        self.failed_tasks = failed;
        self.total_tasks = self.successful_tasks + failed;
        self
    }

    pub fn from_timings(timings: &StepTimings) -> Self {
        Self::calculate(timings.wall_times.clone()).with_failed_count(timings.failed)
    }
}

fn calculate_percentile(sorted_durations: &[Duration], percentile: f64) -> Duration {
    if sorted_durations.is_empty() {
        return Duration::from_secs(0);
    }

    let index = (percentile / 100.0 * (sorted_durations.len() - 1) as f64).round() as usize;
    sorted_durations[index]
}

fn calculate_std_deviation(durations: &[Duration]) -> Duration {
    if durations.len() <= 1 {
        return Duration::from_secs(0);
    }

    let mean_nanos: f64 = durations.iter()
        .map(|d| d.as_nanos() as f64)
        .sum::<f64>() / durations.len() as f64;

    let variance: f64 = durations.iter()
        .map(|d| {
            let diff = d.as_nanos() as f64 - mean_nanos;
            diff * diff
        })
        .sum::<f64>() / durations.len() as f64;

    Duration::from_nanos(variance.sqrt() as u64)
}

pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

fn format_optional(duration: Option<Duration>) -> String {
    duration.map(format_duration).unwrap_or_else(|| "N/A".to_string())
}

pub fn summary_line(stats: &Stats) -> String {
    format!(
        "min={}, median={}, p99={}, max={}, stddev={}, failed={}/{}",
        format_optional(stats.min),
        format_optional(stats.median),
        format_optional(stats.percentile_99),
        format_optional(stats.max),
        format_optional(stats.std_deviation),
        stats.failed_tasks,
        stats.total_tasks,
    )
}

pub fn print_statistics(timings: &IndexMap<String, StepTimings>) {
    tracing::info!("{:<25} | {:>8} | {:>10} | {:>10} | {:>10} | {:>10} | {:>8}",
        "Step Name", "Tasks", "Min", "Median", "P99", "Max", "Failed");
    tracing::info!("{}", "-".repeat(98));

    for (name, step_timings) in timings {
        let stats = Stats::from_timings(step_timings);
        tracing::info!("{:<25} | {:>8} | {:>10} | {:>10} | {:>10} | {:>10} | {:>8}",
            name,
            stats.total_tasks,
            format_optional(stats.min),
            format_optional(stats.median),
            format_optional(stats.percentile_99),
            format_optional(stats.max),
            stats.failed_tasks,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(values: &[u64]) -> Vec<Duration> {
        values.iter().map(|v| Duration::from_millis(*v)).collect()
    }

    #[test]
    fn empty_input_has_no_stats() {
        let stats = Stats::calculate(Vec::new());
        assert_eq!(stats.total_tasks, 0);
        assert!(stats.median.is_none());
        assert!(stats.max.is_none());
    }

    #[test]
    fn percentiles_on_unsorted_input() {
        let stats = Stats::calculate(ms(&[50, 10, 40, 20, 30]));
        assert_eq!(stats.min, Some(Duration::from_millis(10)));
        assert_eq!(stats.median, Some(Duration::from_millis(30)));
        assert_eq!(stats.percentile_99, Some(Duration::from_millis(50)));
        assert_eq!(stats.max, Some(Duration::from_millis(50)));
    }

    #[test]
    fn std_deviation_of_constant_series_is_zero() {
        let stats = Stats::calculate(ms(&[7, 7, 7, 7]));
        assert_eq!(stats.std_deviation, Some(Duration::ZERO));
    }

    #[test]
    fn failures_count_towards_total() {
        let timings = StepTimings {
            wall_times: ms(&[1, 2, 3]),
            failed: 2,
        };
        let stats = Stats::from_timings(&timings);
        assert_eq!(stats.successful_tasks, 3);
        assert_eq!(stats.failed_tasks, 2);
        assert_eq!(stats.total_tasks, 5);
        assert!(summary_line(&stats).ends_with("failed=2/5"));
    }

    #[test]
    fn formats_by_magnitude() {
        assert_eq!(format_duration(Duration::from_micros(250)), "250μs");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
    }
}
