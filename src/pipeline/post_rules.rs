const PHOTO_MARKER: &str = "(ఫొటోలు)";
const SIDE_STORY_TERMS: &[&str] = &["బర్త్ డే", "థాయిలాండ్", "సింధు", "దర్శకులతో"];

/// Second pass over the deduplicated lines: photo galleries, stray ':'
/// fragments and off-topic side stories go. Order is preserved.
pub fn apply(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().filter(|l| keep(l)).collect()
}

fn keep(line: &str) -> bool {
    !line.is_empty()
        && !line.contains(PHOTO_MARKER)
        && !line.starts_with(':')
        && !SIDE_STORY_TERMS.iter().any(|term| line.contains(term))
}
