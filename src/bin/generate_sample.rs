use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Household load in kW for a given hour of day: night base, morning and evening peaks.
fn daily_load(hour: f64) -> f64 {
    let bump = |centre: f64, width: f64, height: f64| {
        height * (-(hour - centre).powi(2) / (2.0 * width.powi(2))).exp()
    };
    0.35 + bump(7.5, 1.2, 0.6) + bump(19.0, 1.8, 1.1)
}

/// Reading times from `start`, one every `step`, for any number of rows.
fn reading_times(start: NaiveDateTime, step: Duration) -> impl Iterator<Item = NaiveDateTime> {
    std::iter::successors(Some(start), move |t| t.checked_add_signed(step))
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let rows: usize = match args.next() {
        Some(n) => n.parse().context("row count must be a positive integer")?,
        None => 24 * 7 * 4,
    };
    let output_path = PathBuf::from(args.next().unwrap_or_else(|| "sample_meter.csv".into()));

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?;
    let step = Duration::minutes(15);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record([
        "Timestamp",
        "Power (kW)",
        "Voltage (V)",
        "Current (A)",
        "Power Factor",
        "Energy (kWh)",
    ])?;

    let mut energy = 0.0;
    let mut times = reading_times(start, step);
    for i in 0..rows {
        let ts = times.next().context("timestamp out of range")?;
        let hour = (i % 96) as f64 / 4.0;

        let power = (daily_load(hour) + rng.gauss(0.0, 0.08)).max(0.05);
        let voltage = 230.0 + rng.gauss(0.0, 2.0);
        let pf = (0.92 + rng.gauss(0.0, 0.02)).clamp(0.7, 1.0);
        let current = power * 1000.0 / (voltage * pf);
        energy += power * 0.25;

        writer.write_record([
            ts.format("%Y-%m-%dT%H:%M:%S").to_string(),
            format!("{power:.3}"),
            format!("{voltage:.1}"),
            format!("{current:.2}"),
            format!("{pf:.3}"),
            format!("{energy:.3}"),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} meter readings (15 min interval) to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_times_are_evenly_spaced() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let times: Vec<NaiveDateTime> = reading_times(start, Duration::minutes(15)).take(97).collect();
        assert_eq!(times.len(), 97);
        assert_eq!(times[96], start + Duration::days(1));
        assert!(times.windows(2).all(|w| w[1] - w[0] == Duration::minutes(15)));
    }

    #[test]
    fn reading_times_stop_instead_of_wrapping() {
        let step = Duration::minutes(15);
        let near_end = NaiveDateTime::MAX - step * 2;
        let times: Vec<NaiveDateTime> = reading_times(near_end, step).take(10).collect();
        assert_eq!(times.len(), 3);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
    }
}
