// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use lws_gf2::{rank, reduce_to_systematic, shorten, BitMatrix, BitVector, Permutation};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(usize, bool),
    Flip(usize),
    Swap(usize, usize),
    Push(u64, usize),
    Pop,
    Remove(usize),
    Truncate(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), any::<bool>()).prop_map(|(i, b)| Op::Set(i, b)),
        any::<usize>().prop_map(Op::Flip),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Swap(a, b)),
        (any::<u64>(), 0usize..=64).prop_map(|(v, w)| Op::Push(v, w)),
        Just(Op::Pop),
        any::<usize>().prop_map(Op::Remove),
        any::<usize>().prop_map(Op::Truncate),
    ]
}

fn apply(v: &mut BitVector, model: &mut Vec<bool>, op: Op) {
    let len = model.len();
    match op {
        Op::Set(i, b) if len > 0 => {
            v.set(i % len, b);
            model[i % len] = b;
        }
        Op::Flip(i) if len > 0 => {
            v.flip(i % len);
            model[i % len] ^= true;
        }
        Op::Swap(a, b) if len > 0 => {
            v.swap_bits(a % len, b % len);
            model.swap(a % len, b % len);
        }
        Op::Push(value, width) => {
            v.push_bits(value, width);
            model.extend((0..width).map(|i| (value >> (width - 1 - i)) & 1 == 1));
        }
        Op::Pop => {
            assert_eq!(v.pop_bit(), model.pop());
        }
        Op::Remove(i) if len > 0 => {
            assert_eq!(v.remove(i % len), model.remove(i % len));
        }
        Op::Truncate(n) => {
            let n = if len == 0 { 0 } else { n % (len + 1) };
            v.truncate(n);
            model.truncate(n);
        }
        _ => {}
    }
}

fn bits(len: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), len)
}

proptest! {
    #[test]
    fn cached_weight_tracks_every_mutation(
        start in prop::collection::vec(any::<bool>(), 0..150),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut v = BitVector::from_bits(start.iter().copied());
        let mut model = start;
        for op in ops {
            apply(&mut v, &mut model, op);
            let ones = model.iter().filter(|&&b| b).count() as u64;
            prop_assert_eq!(v.len(), model.len());
            prop_assert_eq!(v.weight(), ones);
            prop_assert_eq!(v.to_bits(), model.clone());
            // the padding of the last word stays clear
            if let Some(last) = v.as_words().last() {
                let pad = v.padding();
                if pad > 0 {
                    prop_assert_eq!(last & ((1u64 << pad) - 1), 0);
                }
            }
        }
    }

    #[test]
    fn xor_is_its_own_inverse((a, b) in (1usize..200).prop_flat_map(|n| (bits(n), bits(n)))) {
        let a = BitVector::from_bits(a);
        let b = BitVector::from_bits(b);
        let mut c = &a ^ &b;
        prop_assert!(c.weight() <= a.weight() + b.weight());
        c ^= &b;
        prop_assert_eq!(c, a);
    }

    #[test]
    fn bit_fields_read_back((v, start, width) in (1usize..200)
        .prop_flat_map(|n| (bits(n), 0..n))
        .prop_flat_map(|(v, start)| {
            let max = (v.len() - start).min(64);
            (Just(v), Just(start), 0..=max)
        }))
    {
        let vector = BitVector::from_bits(v.iter().copied());
        let expected = v[start..start + width]
            .iter()
            .fold(0u64, |acc, &b| (acc << 1) | u64::from(b));
        prop_assert_eq!(vector.bits(start, width), expected);
    }

    #[test]
    fn reduction_preserves_row_space(rows in prop::collection::vec(bits(12), 1..6)) {
        let original = BitMatrix::from_rows(rows.into_iter().map(BitVector::from_bits).collect()).unwrap();
        let mut reduced = original.clone();
        let mut tracker = BitMatrix::identity(original.rows());
        if let Ok(perm) = reduce_to_systematic(&mut reduced, Some(&mut tracker)) {
            prop_assert!(reduced.is_systematic());
            let permuted = original.permute_columns(&perm);
            for i in 0..reduced.rows() {
                let mut combined = BitVector::zeros(original.cols());
                for j in tracker[i].iter_ones() {
                    combined ^= &permuted[j];
                }
                prop_assert_eq!(&combined, &reduced[i]);
            }

            // reducing the column-permuted original needs no further swaps
            let mut again = permuted.clone();
            let second = reduce_to_systematic(&mut again, None).unwrap();
            prop_assert_eq!(second, Permutation::identity(original.cols()));
            prop_assert_eq!(again, reduced);
        } else {
            prop_assert!(rank(&original) < original.rows());
        }
    }

    #[test]
    fn shortening_keeps_codewords_that_vanish_on_the_forced_columns(
        rows in prop::collection::vec(bits(10), 1..7),
        mask in bits(10),
    ) {
        let m = BitMatrix::from_rows(rows.into_iter().map(BitVector::from_bits).collect()).unwrap();
        let cols: Vec<usize> = (0..10).filter(|&c| mask[c]).collect();
        let all_rows: Vec<usize> = (0..m.rows()).collect();
        let forced = rank(&m.submatrix(&all_rows, &cols));
        match shorten(&m, &cols) {
            Ok(s) => {
                prop_assert_eq!(s.rows(), m.rows() - forced);
                prop_assert_eq!(s.cols(), 10 - cols.len());

                // put the forced zeros back: every row must be a codeword of m
                let rank_m = rank(&m);
                for row in &s {
                    let mut kept = row.iter_ones().peekable();
                    let mut image = BitVector::zeros(10);
                    let mut position = 0;
                    for c in (0..10).filter(|c| !mask[*c]) {
                        if kept.peek() == Some(&position) {
                            image.set(c, true);
                            kept.next();
                        }
                        position += 1;
                    }
                    let mut extended = m.clone();
                    extended.push_row(image).unwrap();
                    prop_assert_eq!(rank(&extended), rank_m);
                }
                if rank_m == m.rows() {
                    prop_assert_eq!(rank(&s), s.rows());
                }
            }
            Err(_) => prop_assert_eq!(forced, m.rows()),
        }
    }

    #[test]
    fn permutation_round_trips_through_inverse(seed in prop::collection::vec(any::<u32>(), 1..64)) {
        let mut order: Vec<usize> = (0..seed.len()).collect();
        order.sort_by_key(|&i| (seed[i], i));
        let perm = Permutation::from_vec(order).unwrap();
        let v = BitVector::from_bits(seed.iter().map(|s| s & 1 == 1));
        prop_assert_eq!(perm.inverse().apply(&perm.apply(&v)), v.clone());
        prop_assert_eq!(perm.unapply(&perm.apply(&v)), v);
    }
}
