use super::CommandDef;

/// Rank command definitions against a partially typed word. Exact and prefix
/// matches dominate; a substring match still surfaces. Aliases count as the
/// command itself.
pub(super) fn rank_commands(defs: Vec<CommandDef>, query: &str) -> Vec<CommandDef> {
    let query = query.to_ascii_lowercase();
    let mut scored: Vec<(u32, CommandDef)> = defs
        .into_iter()
        .filter_map(|def| {
            let best = std::iter::once(def.name)
                .chain(def.aliases.iter().copied())
                .map(|candidate| score(candidate, &query))
                .max()
                .unwrap_or(0);
            (best > 0).then_some((best, def))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.name.cmp(b.1.name)));
    scored.into_iter().map(|(_, def)| def).collect()
}

fn score(candidate: &str, query: &str) -> u32 {
    if query.is_empty() {
        return 1;
    }
    if candidate == query {
        100
    } else if candidate.starts_with(query) {
        80
    } else if candidate.contains(query) {
        40
    } else {
        0
    }
}
