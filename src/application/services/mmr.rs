use crate::domain::Embedding;

/// Maximal marginal relevance re-ranking.
///
/// Picks up to `k` candidate indices. Each step takes the candidate maximising
/// `lambda * sim(query, c) - (1 - lambda) * max(sim(c, picked))`, so `lambda = 1.0`
/// ranks by relevance only and `lambda = 0.0` by diversity only.
pub fn maximal_marginal_relevance(
    query: &Embedding,
    candidates: &[Embedding],
    lambda: f32,
    k: usize,
) -> Vec<usize> {
    if candidates.is_empty() || k == 0 {
        return Vec::new();
    }

    let relevance: Vec<f32> = candidates
        .iter()
        .map(|candidate| query.cosine_similarity(candidate))
        .collect();

    let mut selected: Vec<usize> = Vec::with_capacity(k.min(candidates.len()));
    let mut remaining: Vec<usize> = (0..candidates.len()).collect();

    while selected.len() < k && !remaining.is_empty() {
        let mut best_position = 0;
        let mut best_score = f32::NEG_INFINITY;

        for (position, &index) in remaining.iter().enumerate() {
            let redundancy = selected
                .iter()
                .map(|&picked| candidates[index].cosine_similarity(&candidates[picked]))
                .fold(None, |max: Option<f32>, sim| Some(max.map_or(sim, |m| m.max(sim))))
                .unwrap_or(0.0);

            let score = lambda * relevance[index] - (1.0 - lambda) * redundancy;
            if score > best_score {
                best_score = score;
                best_position = position;
            }
        }

        selected.push(remaining.remove(best_position));
    }

    selected
}
