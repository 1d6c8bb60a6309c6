use crate::stats::CityStats;

use super::demand::ZoneDemand;

/// Phantom demand present even in an empty city, so the first zones grow.
const BOOTSTRAP: f32 = 20.0;

/// Commercial jobs one resident supports as a customer.
const SHOP_JOBS_PER_RESIDENT: f32 = 0.4;

/// Industrial jobs needed to supply one commercial job with goods.
const FACTORY_JOBS_PER_SHOP_JOB: f32 = 0.8;

/// Signed imbalance between what is wanted and what exists, in `[-1, 1]`.
/// Positive when `wanted` exceeds `supply`.
pub(crate) fn ratio_signal(supply: f32, wanted: f32) -> f32 {
    let scale = supply.max(wanted);
    if scale <= 0.0 {
        return 0.0;
    }
    ((wanted - supply) / scale).clamp(-1.0, 1.0)
}

/// Un-damped market balance for each zone kind.
///
/// - Residential: jobs on offer against the resident population.
/// - Commercial: customers against shop jobs.
/// - Industrial: goods wanted by shops against factory jobs.
pub fn compute_zone_demand(stats: &CityStats) -> ZoneDemand {
    let population = stats.population as f32;
    let shop_jobs = stats.commercial_jobs as f32;
    let factory_jobs = stats.industrial_jobs as f32;

    ZoneDemand {
        residential: ratio_signal(population, stats.total_jobs() as f32 + BOOTSTRAP),
        commercial: ratio_signal(shop_jobs, population * SHOP_JOBS_PER_RESIDENT + BOOTSTRAP),
        industrial: ratio_signal(
            factory_jobs,
            shop_jobs * FACTORY_JOBS_PER_SHOP_JOB + BOOTSTRAP,
        ),
    }
}
