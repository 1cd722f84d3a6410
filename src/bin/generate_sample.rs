use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic ranked match dataset as CSV and Parquet.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of matches to generate
    #[arg(long, default_value_t = 5000)]
    rows: usize,

    /// Directory the files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Ladder with rough population weights.
const TIERS: [(&str, f64); 10] = [
    ("IRON", 0.06),
    ("BRONZE", 0.16),
    ("SILVER", 0.20),
    ("GOLD", 0.20),
    ("PLATINUM", 0.15),
    ("EMERALD", 0.12),
    ("DIAMOND", 0.07),
    ("MASTER", 0.025),
    ("GRANDMASTER", 0.01),
    ("CHALLENGER", 0.005),
];

const CHAMPIONS: [&str; 8] = [
    "Ahri", "Jinx", "Lee Sin", "Thresh", "Garen", "Lux", "Yasuo", "Ezreal",
];

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
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

    fn pick_weighted(&mut self, weights: &[(&'static str, f64)]) -> (usize, &'static str) {
        let total: f64 = weights.iter().map(|w| w.1).sum();
        let mut r = self.next_f64() * total;
        for (i, &(name, w)) in weights.iter().enumerate() {
            if r < w {
                return (i, name);
            }
            r -= w;
        }
        let last = weights.len() - 1;
        (last, weights[last].0)
    }
}

#[derive(Debug, Serialize)]
struct SampleMatch {
    match_id: i64,
    champion: &'static str,
    #[serde(serialize_with = "pandas_bool")]
    win: bool,
    duration: i64,
    mastery_level: i64,
    solo_tier: String,
    kills: i64,
}

/// pandas writes booleans as `True` / `False`.
fn pandas_bool<S: serde::Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(if *value { "True" } else { "False" })
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<SampleMatch> {
    (0..rows)
        .map(|i| {
            let (tier_idx, tier) = rng.pick_weighted(&TIERS);
            // About 1% of rows carry a tier outside the ladder.
            let solo_tier = if rng.next_f64() < 0.01 {
                "UNRANKED".to_string()
            } else {
                tier.to_string()
            };

            // Long-tailed mastery: most players low, a few very high.
            let mastery_level = (rng.next_f64().powi(3) * 120.0).floor() as i64;

            let p_win = 0.46 + 0.08 * (mastery_level as f64 / 120.0);
            let win = rng.next_f64() < p_win;

            // Higher tiers end games slightly faster.
            let mean_secs = 1900.0 - 25.0 * tier_idx as f64;
            let duration = rng.gauss(mean_secs, 280.0).clamp(900.0, 3300.0).round() as i64;

            let champion = CHAMPIONS[(rng.next_u64() % CHAMPIONS.len() as u64) as usize];
            let kills = rng.gauss(6.0, 3.5).max(0.0).round() as i64;

            SampleMatch {
                match_id: i as i64 + 1,
                champion,
                win,
                duration,
                mastery_level,
                solo_tier,
                kills,
            }
        })
        .collect()
}

fn write_csv(path: &Path, matches: &[SampleMatch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for m in matches {
        writer.serialize(m).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, matches: &[SampleMatch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("match_id", DataType::Int64, false),
        Field::new("champion", DataType::Utf8, false),
        Field::new("win", DataType::Boolean, false),
        Field::new("duration", DataType::Int64, false),
        Field::new("mastery_level", DataType::Int64, false),
        Field::new("solo_tier", DataType::Utf8, false),
        Field::new("kills", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(matches.iter().map(|m| m.match_id))),
            Arc::new(StringArray::from_iter_values(matches.iter().map(|m| m.champion))),
            Arc::new(BooleanArray::from(
                matches.iter().map(|m| m.win).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from_iter_values(matches.iter().map(|m| m.duration))),
            Arc::new(Int64Array::from_iter_values(
                matches.iter().map(|m| m.mastery_level),
            )),
            Arc::new(StringArray::from_iter_values(
                matches.iter().map(|m| m.solo_tier.as_str()),
            )),
            Arc::new(Int64Array::from_iter_values(matches.iter().map(|m| m.kills))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    let matches = generate(args.rows, &mut rng);

    std::fs::create_dir_all(&args.out_dir).context("creating output directory")?;
    let csv_path = args.out_dir.join("sample_matches.csv");
    let parquet_path = args.out_dir.join("sample_matches.parquet");
    write_csv(&csv_path, &matches)?;
    write_parquet(&parquet_path, &matches)?;

    println!(
        "Wrote {} matches to {} and {}",
        matches.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_rows() {
        let a = generate(50, &mut SimpleRng::new(7));
        let b = generate(50, &mut SimpleRng::new(7));
        let key = |m: &SampleMatch| (m.win, m.duration, m.mastery_level, m.solo_tier.clone());
        assert_eq!(
            a.iter().map(key).collect::<Vec<_>>(),
            b.iter().map(key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn rows_stay_in_plausible_ranges() {
        for m in generate(2000, &mut SimpleRng::new(42)) {
            assert!((900..=3300).contains(&m.duration));
            assert!((0..120).contains(&m.mastery_level));
            assert!(m.kills >= 0);
        }
    }

    #[test]
    fn csv_uses_pandas_booleans() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.csv");
        write_csv(&path, &generate(3, &mut SimpleRng::new(1))).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("match_id,champion,win,duration,mastery_level,solo_tier,kills")
        );
        for line in lines {
            let win = line.split(',').nth(2).unwrap();
            assert!(win == "True" || win == "False");
        }
    }
}
