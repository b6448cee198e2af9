/// Index of the largest element. The first one wins on ties.
pub fn argmax<T: PartialOrd>(iter: impl Iterator<Item = T>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, v) in iter.enumerate() {
        match &best {
            Some((_, b)) if !(v > *b) => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
