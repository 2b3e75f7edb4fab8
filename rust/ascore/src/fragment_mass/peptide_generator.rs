use super::combinations::combinations;
use super::ion_series::{
    IonKind,
    IonSeries,
};
use crate::errors::DataProcessingError;
use crate::mass::AminoAcidMasses;
use crate::mass::constants::{
    CARBON,
    ELECTRON,
    HYDROGEN,
    NITROGEN,
    OXYGEN,
    PROTON,
    Z_ION_OFFSET,
    ion_mz,
};
use crate::models::{
    ModificationDescriptor,
    Peptide,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::sync::Arc;
use tracing::debug;

/// Loss of a fixed mass from fragments containing one of `residues`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralLoss {
    /// Mass lost. The sign is ignored, the magnitude is always subtracted.
    pub mass: f64,
    pub residues: String,
}

impl NeutralLoss {
    pub fn applies(&self, aa: char) -> bool {
        self.residues.chars().any(|x| x == aa)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    pub max_peptides: usize,
    /// The last residue is never an eligible site.
    pub no_cterm: bool,
    pub neutral_loss: Option<NeutralLoss>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_peptides: 1000,
            no_cterm: false,
            neutral_loss: None,
        }
    }
}

/// Which fragments to emit and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IonRequest {
    pub series: IonSeries,
    pub max_charge: u8,
    /// Exclusive bounds.
    pub min_mz: f64,
    pub max_mz: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FragmentIon {
    pub mz: f64,
    pub charge: u8,
    pub kind: IonKind,
    pub ordinal: usize,
    pub neutral_loss: bool,
}

/// Enumerates the placements of a target modification over a peptide and
/// builds the theoretical fragments of each one.
///
/// Placements are materialized on construction so any of them can be
/// revisited by index.
#[derive(Debug, Clone)]
pub struct PeptideGenerator {
    base: Peptide,
    target: Arc<ModificationDescriptor>,
    mod_count: usize,
    placements: Vec<Vec<usize>>,
    /// Residue masses including every non target modification.
    residue_masses: Vec<f64>,
    can_lose: Vec<bool>,
    n_term: f64,
    c_term: f64,
    neutral_loss: Option<f64>,
}

impl PeptideGenerator {
    pub fn new(
        peptide: &Peptide,
        target: Arc<ModificationDescriptor>,
        masses: &AminoAcidMasses,
        options: &GeneratorOptions,
    ) -> Result<Self, DataProcessingError> {
        let mod_count = peptide.mods().positions_of(target.symbol).len();
        let base = peptide.without_mods_of(target.symbol);

        let mut residue_masses = Vec::with_capacity(base.len());
        for (position, aa) in base.sequence().chars().enumerate() {
            let mass = masses
                .residue_mass(aa)
                .ok_or(DataProcessingError::UnknownResidue {
                    residue: aa,
                    position,
                })?;
            residue_masses.push(mass);
        }
        for m in base.mods().iter() {
            residue_masses[m.position] += m.mass();
        }

        let last = base.len().saturating_sub(1);
        let eligible: Vec<usize> = base
            .sequence()
            .chars()
            .enumerate()
            .filter(|(i, aa)| target.applies(*aa) && !(options.no_cterm && *i == last))
            .map(|(i, _)| i)
            .collect();
        let placements = combinations(&eligible, mod_count, options.max_peptides);
        debug!(
            "{}: {} target mods over {} sites, {} placements",
            peptide,
            mod_count,
            eligible.len(),
            placements.len()
        );

        let can_lose = match &options.neutral_loss {
            Some(nl) => base.sequence().chars().map(|aa| nl.applies(aa)).collect(),
            None => vec![false; base.len()],
        };

        Ok(Self {
            base,
            target,
            mod_count,
            placements,
            residue_masses,
            can_lose,
            n_term: masses.n_term_mass(),
            c_term: masses.c_term_mass(),
            neutral_loss: options.neutral_loss.as_ref().map(|x| x.mass.abs()),
        })
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of target modifications on the input peptide.
    pub fn mod_count(&self) -> usize {
        self.mod_count
    }

    pub fn target(&self) -> &Arc<ModificationDescriptor> {
        &self.target
    }

    pub fn placement(&self, index: usize) -> Option<&[usize]> {
        self.placements.get(index).map(|x| x.as_slice())
    }

    /// The candidate peptide for a placement.
    pub fn peptide(&self, index: usize) -> Option<Peptide> {
        let placement = self.placements.get(index)?;
        let mut out = self.base.clone();
        out.generator_index = index;
        for &pos in placement {
            // Eligible positions come from the sequence itself.
            out.add_mod(pos, self.target.clone()).ok()?;
        }
        Some(out)
    }

    /// Theoretical fragments of a placement, sorted by m/z.
    pub fn ions(&self, index: usize, request: &IonRequest) -> Option<Vec<FragmentIon>> {
        let placement = self.placements.get(index)?;
        let mut masses = self.residue_masses.clone();
        for &pos in placement {
            masses[pos] += self.target.mass;
        }

        let mut out = Vec::new();

        let mut b = PROTON + self.n_term;
        let mut c = NITROGEN + (3.0 * HYDROGEN) - ELECTRON + self.n_term;
        let mut has_loss = false;
        for (i, residue) in masses.iter().enumerate() {
            b += residue;
            c += residue;
            let a = b - CARBON - OXYGEN;
            has_loss |= self.can_lose[i];
            for (kind, mass) in [(IonKind::a, a), (IonKind::b, b), (IonKind::c, c)] {
                self.push_fragments(&mut out, request, kind, i + 1, mass, has_loss);
            }
        }

        let mut y = (3.0 * HYDROGEN) + OXYGEN - ELECTRON + self.c_term;
        let mut z = Z_ION_OFFSET - ELECTRON + self.c_term;
        has_loss = false;
        for i in (1..masses.len()).rev() {
            y += masses[i];
            z += masses[i];
            let x = y + CARBON + OXYGEN - (2.0 * HYDROGEN);
            has_loss |= self.can_lose[i];
            let ordinal = masses.len() - i;
            for (kind, mass) in [(IonKind::x, x), (IonKind::y, y), (IonKind::z, z)] {
                self.push_fragments(&mut out, request, kind, ordinal, mass, has_loss);
            }
        }

        out.sort_by(|a, b| a.mz.total_cmp(&b.mz));
        Some(out)
    }

    fn push_fragments(
        &self,
        out: &mut Vec<FragmentIon>,
        request: &IonRequest,
        kind: IonKind,
        ordinal: usize,
        mass: f64,
        has_loss: bool,
    ) {
        let mut push = |mass: f64, neutral_loss: bool| {
            for charge in 1..=request.max_charge {
                let mz = ion_mz(mass, charge);
                if mz > request.min_mz && mz < request.max_mz {
                    out.push(FragmentIon {
                        mz,
                        charge,
                        kind,
                        ordinal,
                        neutral_loss,
                    });
                }
            }
        };

        if kind.wants_base(request.series) {
            push(mass, false);
        }
        if let Some(loss) = self.neutral_loss {
            if has_loss && kind.wants_neutral_loss(request.series) {
                push(mass - loss, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phospho() -> Arc<ModificationDescriptor> {
        Arc::new(ModificationDescriptor {
            symbol: '#',
            mass: 79.966331,
            residues: "STY".into(),
            n_term: false,
            c_term: false,
        })
    }

    fn request(series: IonSeries) -> IonRequest {
        IonRequest {
            series,
            max_charge: 1,
            min_mz: 0.0,
            max_mz: f64::INFINITY,
        }
    }

    fn generator(seq: &str, n_mods: &[usize], options: &GeneratorOptions) -> PeptideGenerator {
        let mut peptide = Peptide::new(seq);
        for &p in n_mods {
            peptide.add_mod(p, phospho()).unwrap();
        }
        PeptideGenerator::new(&peptide, phospho(), &AminoAcidMasses::default(), options)
            .unwrap()
    }

    #[test]
    fn test_single_mod() {
        let generator = generator("MSLTK", &[1], &GeneratorOptions::default());
        assert_eq!(generator.len(), 2);
        assert_eq!(generator.mod_count(), 1);
        assert_eq!(generator.placement(0), Some(&[1usize][..]));
        assert_eq!(generator.placement(1), Some(&[3usize][..]));
        let second = generator.peptide(1).unwrap();
        assert_eq!(second.to_string(), "MSLT#K");
        assert_eq!(second.generator_index, 1);
        assert!(generator.peptide(2).is_none());
    }

    #[test]
    fn test_double_mod() {
        let generator = generator("MSLTGYK", &[1, 3], &GeneratorOptions::default());
        assert_eq!(generator.len(), 3);
        let all: Vec<String> = (0..3)
            .map(|i| generator.peptide(i).unwrap().to_string())
            .collect();
        assert_eq!(all, vec!["MS#LT#GYK", "MS#LTGY#K", "MSLT#GY#K"]);
    }

    #[test]
    fn test_no_cterm() {
        let options = GeneratorOptions {
            no_cterm: true,
            ..Default::default()
        };
        let generator = generator("PEPTIDES", &[3], &options);
        assert_eq!(generator.len(), 1);
        assert_eq!(generator.placement(0), Some(&[3usize][..]));
    }

    #[test]
    fn test_b1_and_y1() {
        let generator = generator("PEPTIDE", &[], &GeneratorOptions::default());
        let ions = generator
            .ions(0, &request(IonSeries::B | IonSeries::Y))
            .unwrap();
        let b1 = ions
            .iter()
            .find(|x| x.kind == IonKind::b && x.ordinal == 1)
            .unwrap();
        assert!((b1.mz - (PROTON + 97.05276388)).abs() < 1e-9);
        let y1 = ions
            .iter()
            .find(|x| x.kind == IonKind::y && x.ordinal == 1)
            .unwrap();
        assert!((y1.mz - 148.0604342).abs() < 1e-6);
        // b1..b7 and y1..y6
        assert_eq!(ions.len(), 13);
    }

    #[test]
    fn test_x_ion_offset() {
        let generator = generator("PEPTIDE", &[], &GeneratorOptions::default());
        let ions = generator
            .ions(0, &request(IonSeries::X | IonSeries::Y))
            .unwrap();
        let y2 = ions
            .iter()
            .find(|x| x.kind == IonKind::y && x.ordinal == 2)
            .unwrap();
        let x2 = ions
            .iter()
            .find(|x| x.kind == IonKind::x && x.ordinal == 2)
            .unwrap();
        let expected = CARBON + OXYGEN - 2.0 * HYDROGEN;
        assert!((x2.mz - y2.mz - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_and_windowed() {
        let generator = generator("MSLTGYK", &[1, 3], &GeneratorOptions::default());
        let req = IonRequest {
            series: IonSeries::from_tokens(&["a", "b", "c", "x", "y", "z"]).unwrap(),
            max_charge: 2,
            min_mz: 150.0,
            max_mz: 700.0,
        };
        for i in 0..generator.len() {
            let ions = generator.ions(i, &req).unwrap();
            assert!(!ions.is_empty());
            assert!(ions.windows(2).all(|w| w[0].mz <= w[1].mz));
            assert!(ions.iter().all(|x| x.mz > 150.0 && x.mz < 700.0));
        }
    }

    #[test]
    fn test_more_series_only_adds() {
        let generator = generator("MSLTGYK", &[3], &GeneratorOptions::default());
        let small = generator.ions(0, &request(IonSeries::B)).unwrap();
        let large = generator
            .ions(0, &request(IonSeries::B | IonSeries::Y | IonSeries::C))
            .unwrap();
        assert!(large.len() > small.len());
        for ion in small.iter() {
            assert!(large.iter().any(|x| x == ion));
        }
    }

    #[test]
    fn test_neutral_loss_needs_residue() {
        let options = GeneratorOptions {
            neutral_loss: Some(NeutralLoss {
                mass: 97.97689,
                residues: "S".into(),
            }),
            ..Default::default()
        };
        let generator = generator("GSAK", &[1], &options);
        let ions = generator.ions(0, &request(IonSeries::B)).unwrap();
        let losses: Vec<usize> = ions
            .iter()
            .filter(|x| x.neutral_loss)
            .map(|x| x.ordinal)
            .collect();
        assert_eq!(ions.len(), 4 + 3);
        assert!(!losses.contains(&1));
        assert_eq!(losses.len(), 3);

        // Loss only flag: no plain b ions.
        let ions = generator
            .ions(0, &request(IonSeries::B_NEUTRAL_LOSS))
            .unwrap();
        assert_eq!(ions.len(), 3);
        assert!(ions.iter().all(|x| x.neutral_loss));
    }

    #[test]
    fn test_unknown_residue() {
        let out = PeptideGenerator::new(
            &Peptide::new("PEPBK"),
            phospho(),
            &AminoAcidMasses::default(),
            &GeneratorOptions::default(),
        );
        assert_eq!(
            out.unwrap_err(),
            DataProcessingError::UnknownResidue {
                residue: 'B',
                position: 3
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let generator = generator("MSLTGYK", &[1], &GeneratorOptions::default());
        let req = request(IonSeries::B | IonSeries::Y);
        assert_eq!(generator.ions(1, &req), generator.ions(1, &req));
    }
}
