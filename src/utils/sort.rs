/// Sort SoA (inds/vals) by inds ascending, reordering vals alongside.
/// Indices are expected to be unique, so stability is not required.
#[inline]
pub fn sort_by_index<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    assert_eq!(inds.len(), vals.len());
    let n = inds.len();
    if n <= 1 {
        return;
    }

    // Small sizes: insertion sort beats allocating scratch.
    if n <= 32 {
        insertion_sort_u32_soa(inds, vals);
        return;
    }

    let mut pairs: Vec<(u32, N)> = inds.iter().copied().zip(vals.iter().copied()).collect();
    pairs.sort_unstable_by_key(|&(k, _)| k);
    for (pos, (k, v)) in pairs.into_iter().enumerate() {
        inds[pos] = k;
        vals[pos] = v;
    }
}

#[inline]
fn insertion_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    for i in 1..inds.len() {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sorted(keys: &[u32]) {
        for i in 1..keys.len() {
            assert!(keys[i - 1] <= keys[i], "not sorted at {i}: {} > {}", keys[i - 1], keys[i]);
        }
    }

    /// tiny deterministic PRNG (xorshift32)
    struct Rng(u32);
    impl Rng {
        fn next_u32(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }
    }

    #[test]
    fn handles_empty_and_single() {
        let mut inds: Vec<u32> = vec![];
        let mut vals: Vec<f32> = vec![];
        sort_by_index(&mut inds, &mut vals);
        assert!(inds.is_empty());

        let mut inds = vec![42u32];
        let mut vals = vec![7.0f32];
        sort_by_index(&mut inds, &mut vals);
        assert_eq!(inds, vec![42]);
        assert_eq!(vals, vec![7.0]);
    }

    #[test]
    fn keeps_pairs_together_across_sizes() {
        let mut rng = Rng(0x1234_5678);
        for &n in &[2usize, 3, 31, 32, 33, 64, 500] {
            // unique keys: shuffle 0..n
            let mut inds: Vec<u32> = (0..n as u32).collect();
            for i in (1..n).rev() {
                let j = (rng.next_u32() as usize) % (i + 1);
                inds.swap(i, j);
            }
            // value encodes its key
            let mut vals: Vec<f64> = inds.iter().map(|&k| k as f64 * 0.5).collect();

            sort_by_index(&mut inds, &mut vals);

            assert_sorted(&inds);
            for (k, v) in inds.iter().zip(&vals) {
                assert_eq!(*k as f64 * 0.5, *v, "pair broken at n={n}");
            }
        }
    }
}
