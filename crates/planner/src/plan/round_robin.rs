use crate::site::Site;

/// Deal sorted sites to crews cyclically: site `i` goes to crew `i % crew_count`.
pub fn assign<'a>(sorted: &[&'a Site], crew_count: usize) -> Vec<Vec<&'a Site>> {
    let mut crews: Vec<Vec<&Site>> = vec![Vec::new(); crew_count];
    for (idx, &site) in sorted.iter().enumerate() {
        crews[idx % crew_count].push(site);
    }
    crews
}
