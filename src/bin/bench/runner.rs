use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::{BenchConfig, Step};
use crate::stats::{print_statistics, summary_line, Stats, StepTimings};

/// Outcome of a single request.
#[derive(Debug)]
pub struct TaskOutcome {
    pub task_num: usize,
    pub elapsed: Duration,
    pub ok: bool,
    pub detail: String,
}

pub struct BenchRunner {
    config: BenchConfig,
    client: reqwest::Client,
    iterations: usize,
}

impl BenchRunner {
    pub fn new(config: BenchConfig, iterations: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            config,
            client,
            iterations,
        })
    }

    pub async fn run(&self) -> Result<IndexMap<String, StepTimings>> {
        let mut timings: IndexMap<String, StepTimings> = IndexMap::new();

        for iteration in 1..=self.iterations {
            if self.iterations > 1 {
                tracing::info!("{}", "=".repeat(80));
                tracing::info!("Iteration {}/{}", iteration, self.iterations);
                tracing::info!("{}", "=".repeat(80));
            }

            for step in &self.config.steps {
                self.run_step(step, &mut timings).await?;
            }
        }

        if self.iterations > 1 {
            tracing::info!("{}", "=".repeat(80));
            tracing::info!("Completed {} iterations against {}", self.iterations, self.config.url);
            tracing::info!("{}", "=".repeat(80));
            print_statistics(&timings);
        }

        Ok(timings)
    }

    async fn run_step(&self, step: &Step, timings: &mut IndexMap<String, StepTimings>) -> Result<()> {
        tracing::info!("Executing '{}': {} tasks, concurrency {}", step.name, step.tasks, step.concurrency);
        tracing::info!("{:<25} | {:<10} | {:<15}", "Step Name", "Status", "Wall (ms)");
        tracing::info!("{}", "-".repeat(80));

        let overall_start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(step.concurrency));
        let payload = Arc::new(step.payload.clone());
        let mut set = JoinSet::new();

        for task_num in 0..step.tasks {
            let permit = semaphore.clone().acquire_owned().await
                .context("Concurrency limiter closed")?;
            let client = self.client.clone();
            let url = self.config.url.clone();
            let payload = payload.clone();

            set.spawn(async move {
                let outcome = send_request(&client, &url, &payload, task_num).await;
                drop(permit);
                outcome
            });
        }

        let mut step_timing = StepTimings::default();
        while let Some(joined) = set.join_next().await {
            let outcome = joined.context("Benchmark task panicked")?;
            let task_name = format!("{} #{}", step.name, outcome.task_num + 1);
            let status = if outcome.ok { "OK" } else { "ERROR" };
            let wall = if step.bench {
                format!("{:.3}", outcome.elapsed.as_secs_f64() * 1000.0)
            } else {
                "N/A".to_string()
            };

            tracing::info!("{:<25} | {:<10} | {:<15}", task_name, status, wall);
            if outcome.ok {
                tracing::debug!("Response for {}: {}", task_name, outcome.detail);
            } else {
                tracing::warn!("ERROR in {}: {}", task_name, outcome.detail);
            }

            if outcome.ok {
                step_timing.wall_times.push(outcome.elapsed);
            } else {
                step_timing.failed += 1;
            }
        }

        if !step.bench {
            return Ok(());
        }

        let total_wall_time_ms = overall_start.elapsed().as_secs_f64() * 1000.0;
        let avg_time_per_task_ms = total_wall_time_ms / step.tasks as f64;

        tracing::info!("{}", "-".repeat(80));
        tracing::info!("Summary for '{}' ({} tasks, concurrency: {}):", step.name, step.tasks, step.concurrency);
        tracing::info!("  Wall time: {}", summary_line(&Stats::from_timings(&step_timing)));
        tracing::info!("  Total wall clock time: {:.3}ms", total_wall_time_ms);
        tracing::info!("  Average time per task: {:.3}ms (total wall clock / {} tasks)", avg_time_per_task_ms, step.tasks);

        let accumulated = timings.entry(step.name.clone()).or_default();
        accumulated.wall_times.extend(step_timing.wall_times);
        accumulated.failed += step_timing.failed;

        Ok(())
    }
}

async fn send_request(client: &reqwest::Client, url: &str, payload: &Value, task_num: usize) -> TaskOutcome {
    let start = Instant::now();
    let result = client.post(url).json(payload).send().await;

    let (ok, detail) = match result {
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            (status.is_success(), format!("{status}: {body}"))
        }
        Err(e) if e.is_timeout() => (false, "request timed out".to_string()),
        Err(e) => (false, e.to_string()),
    };

    TaskOutcome {
        task_num,
        elapsed: start.elapsed(),
        ok,
        detail,
    }
}
