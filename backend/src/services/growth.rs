//! Growth curve simulation
//!
//! Expands a point yield estimate into a period-by-period trajectory along a
//! logistic ramp: slow start, fast middle, plateau late. Baseline forecasts
//! use a month-indexed ramp; what-if scenarios use a steeper week-indexed
//! one. The two curves' constants differ deliberately and downstream
//! consumers depend on their exact shape.
//!
//! Each period gets a bounded random perturbation. The random source is
//! injected so a seeded run replays identically; bounds come from
//! [`crate::config::SimulatorConfig`].

use chrono::{Duration, NaiveDate};
use rand::Rng;
use shared::GrowthPoint;

/// Month-indexed trajectory for a baseline forecast.
///
/// Cumulative progress after month i of n follows
/// `100 / (1 + e^(-6(progress - 0.5)))` percent, perturbed by a
/// multiplicative factor in `1 ± noise_pct`.
pub fn monthly_curve<R: Rng + ?Sized>(
    total_yield: f64,
    months: u32,
    price_per_quintal: f64,
    sowing_date: NaiveDate,
    noise_pct: f64,
    rng: &mut R,
) -> Vec<GrowthPoint> {
    let months = months.max(1);
    let mut points = Vec::with_capacity(months as usize);

    for i in 0..months {
        let month_date = sowing_date + Duration::days(i as i64 * 30);

        let progress = (i + 1) as f64 / months as f64;
        let mut yield_pct = 100.0 / (1.0 + (-6.0 * (progress - 0.5)).exp());

        if noise_pct > 0.0 {
            yield_pct *= rng.gen_range(1.0 - noise_pct..1.0 + noise_pct);
        }

        let period_yield = (total_yield * yield_pct / 100.0).max(0.0);
        points.push(GrowthPoint {
            period: month_date.format("%b").to_string(),
            yield_qtl: round2(period_yield),
            income_inr: round2(period_yield * price_per_quintal),
        });
    }

    points
}

/// Week-indexed trajectory for a what-if scenario.
///
/// Week w of n reaches fraction `1 / (1 + e^(-0.8(w - n/2)))` of the
/// adjusted yield, perturbed by an additive term in `± noise_abs` quintals.
pub fn weekly_curve<R: Rng + ?Sized>(
    total_yield: f64,
    weeks: u32,
    price_per_quintal: f64,
    noise_abs: f64,
    rng: &mut R,
) -> Vec<GrowthPoint> {
    let weeks = weeks.max(1);
    let midpoint = weeks as f64 / 2.0;
    let mut points = Vec::with_capacity(weeks as usize);

    for week in 1..=weeks {
        let frac = 1.0 / (1.0 + (-0.8 * (week as f64 - midpoint)).exp());
        let mut period_yield = total_yield * frac;

        if noise_abs > 0.0 {
            period_yield += rng.gen_range(-noise_abs..noise_abs);
        }
        let period_yield = period_yield.max(0.0);

        points.push(GrowthPoint {
            period: format!("Week {}", week),
            yield_qtl: round2(period_yield),
            income_inr: round2(period_yield * price_per_quintal),
        });
    }

    points
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
