use crate::error::{PlannerError, Result};
use crate::site::{Position, Site};

/// Greedy nearest-neighbor chaining.
///
/// Sites are taken in the given (risk-descending) order. Each goes to the crew
/// with the lowest cost, where an empty crew costs 0 and any other crew costs
/// the distance from its most recently assigned site. Ties go to the lowest
/// crew index. Each step is locally optimal only: total travel and crew sizes
/// are not balanced.
///
/// # Errors
/// `MissingPosition` naming the first site without coordinates. Checked up
/// front so no partial assignment is produced.
pub fn assign<'a>(sorted: &[&'a Site], crew_count: usize) -> Result<Vec<Vec<&'a Site>>> {
    let positioned = sorted
        .iter()
        .map(|&site| {
            site.position
                .map(|pos| (site, pos))
                .ok_or_else(|| PlannerError::MissingPosition {
                    site_id: site.id.clone(),
                })
        })
        .collect::<Result<Vec<(&Site, Position)>>>()?;

    let mut crews: Vec<Vec<&Site>> = vec![Vec::new(); crew_count];
    // Position of each crew's last site
    let mut tails: Vec<Option<Position>> = vec![None; crew_count];

    for (site, pos) in positioned {
        let mut best = 0;
        let mut best_cost = f64::INFINITY;
        for (idx, tail) in tails.iter().enumerate() {
            let cost = tail.map_or(0.0, |t| t.distance_to(&pos));
            if cost < best_cost {
                best = idx;
                best_cost = cost;
            }
        }
        log::trace!("{} -> crew {} (cost {:.6})", site.id, best, best_cost);
        crews[best].push(site);
        tails[best] = Some(pos);
    }

    Ok(crews)
}
