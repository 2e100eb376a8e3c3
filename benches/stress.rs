use std::time::{Duration, Instant};

use chrono::{NaiveTime, Weekday};
use ulid::Ulid;

use slotboard::{ResourceKey, ScheduleEntry, SlotBoard, TimeWindow, WeekdaySet, find_conflict};

const ITERS: usize = 1_000;

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let idx = ((sorted.len() as f64) * p / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn print_latency(label: &str, latencies: &mut [Duration]) {
    latencies.sort();
    let total: Duration = latencies.iter().sum();
    let avg = total / latencies.len() as u32;
    println!("  {label}:");
    println!(
        "    n={}, avg={:.2}us, p50={:.2}us, p95={:.2}us, p99={:.2}us, max={:.2}us",
        latencies.len(),
        avg.as_secs_f64() * 1e6,
        percentile(latencies, 50.0).as_secs_f64() * 1e6,
        percentile(latencies, 95.0).as_secs_f64() * 1e6,
        percentile(latencies, 99.0).as_secs_f64() * 1e6,
        latencies.last().unwrap().as_secs_f64() * 1e6,
    );
}

fn sec(s: u32) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt(s, 0).unwrap()
}

fn slot(key: &ResourceKey, day: Weekday, start: u32, end: u32) -> ScheduleEntry {
    let days: WeekdaySet = [day].into_iter().collect();
    ScheduleEntry::new(Ulid::new(), key.clone(), days, TimeWindow::new(sec(start), sec(end)))
}

#[tokio::main]
async fn main() {
    println!("slotboard stress");

    // Pure check, worst case: candidate's window spans every existing entry
    // but its day is disjoint, so nothing short-circuits the scan.
    println!("find_conflict scan:");
    for &n in &[100u32, 1_000, 10_000] {
        let key = ResourceKey::new(Ulid::new(), None, Some("center court"), Ulid::new());
        let existing: Vec<ScheduleEntry> = (0..n)
            .map(|i| slot(&key, Weekday::Mon, i * 8, i * 8 + 6))
            .collect();
        let candidate = slot(&key, Weekday::Tue, 0, n * 8);

        let mut latencies = Vec::with_capacity(ITERS);
        for _ in 0..ITERS {
            let start = Instant::now();
            let hit = find_conflict(&candidate, &existing);
            std::hint::black_box(hit);
            latencies.push(start.elapsed());
        }
        print_latency(&format!("{n} existing, no hit"), &mut latencies);
    }

    // Registry round trip on a busy key.
    println!("register/withdraw on a key with 200 entries:");
    let board = SlotBoard::new();
    let key = ResourceKey::new(Ulid::new(), None, Some("center court"), Ulid::new());
    for i in 0..200 {
        board.register(slot(&key, Weekday::Mon, i * 120, i * 120 + 60)).await.unwrap();
    }

    let mut latencies = Vec::with_capacity(ITERS);
    for _ in 0..ITERS {
        let entry = slot(&key, Weekday::Sat, 30_000, 33_600);
        let id = entry.id;
        let start = Instant::now();
        board.register(entry).await.unwrap();
        board.withdraw(id).await.unwrap();
        latencies.push(start.elapsed());
    }
    print_latency("round trip", &mut latencies);
}
