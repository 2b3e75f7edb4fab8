use crate::fragment_mass::FragmentIon;

/// Ions closer than this are considered the same fragment.
const SAME_ION_EPSILON: f64 = 1e-5;

/// Ions of `ions` with no counterpart in `remove`. Both lists are sorted by m/z.
pub fn site_determining_ions(ions: &[FragmentIon], remove: &[FragmentIon]) -> Vec<FragmentIon> {
    let mut out = Vec::new();
    let mut j = 0;
    for ion in ions {
        while j < remove.len() && remove[j].mz < ion.mz - SAME_ION_EPSILON {
            j += 1;
        }
        if j < remove.len() && (ion.mz - remove[j].mz).abs() < SAME_ION_EPSILON {
            continue;
        }
        out.push(*ion);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment_mass::IonKind;

    fn ions(mzs: &[f64]) -> Vec<FragmentIon> {
        mzs.iter()
            .enumerate()
            .map(|(i, &mz)| FragmentIon {
                mz,
                charge: 1,
                kind: IonKind::b,
                ordinal: i + 1,
                neutral_loss: false,
            })
            .collect()
    }

    #[test]
    fn test_symmetric_difference() {
        let a = ions(&[100.0, 200.0, 300.0, 400.0]);
        let b = ions(&[100.000001, 250.0, 300.0, 450.0]);
        let only_a: Vec<f64> = site_determining_ions(&a, &b).iter().map(|x| x.mz).collect();
        let only_b: Vec<f64> = site_determining_ions(&b, &a).iter().map(|x| x.mz).collect();
        assert_eq!(only_a, vec![200.0, 400.0]);
        assert_eq!(only_b, vec![250.0, 450.0]);
    }

    #[test]
    fn test_identical() {
        let a = ions(&[100.0, 200.0]);
        assert!(site_determining_ions(&a, &a).is_empty());
        assert_eq!(site_determining_ions(&a, &[]).len(), 2);
    }
}
