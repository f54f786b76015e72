//! Noyau — opérations matricielles (dispatch + validation)
//!
//! texte A [+ texte B] -> lire_matrice -> validation formes -> algèbre -> Resultat
//!
//! Contrats :
//! - Addition / Soustraction / Terme à terme : formes identiques
//! - Produit : colonnes(A) == lignes(B)
//! - Déterminant / Inverse : matrice carrée
//! - Inverse : seulement si |det| >= seuil (valeur brute) ; sinon Avis, pas d’erreur
//!   (avis distinct si l’inverse déborde malgré un déterminant correct)

use std::fmt;

use tracing::{debug, warn};

use super::algebre;
use super::erreurs::{ErreurCalcul, ErreurOperation};
use super::format::{format_determinant, format_matrice};
use super::lecture::lire_matrice;
use super::matrice::Matrice;
use super::reglages::Reglages;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationMatrice {
    Addition,
    Soustraction,
    Produit,
    ProduitTermeATerme,
    Transposee,
    Rang,
    Determinant,
    Inverse,
}

impl OperationMatrice {
    /// Ordre d’affichage dans la liste déroulante.
    pub const TOUTES: [OperationMatrice; 8] = [
        OperationMatrice::Addition,
        OperationMatrice::Soustraction,
        OperationMatrice::Produit,
        OperationMatrice::ProduitTermeATerme,
        OperationMatrice::Transposee,
        OperationMatrice::Rang,
        OperationMatrice::Determinant,
        OperationMatrice::Inverse,
    ];

    pub fn libelle(self) -> &'static str {
        match self {
            OperationMatrice::Addition => "Addition (A + B)",
            OperationMatrice::Soustraction => "Soustraction (A - B)",
            OperationMatrice::Produit => "Produit (A · B)",
            OperationMatrice::ProduitTermeATerme => "Produit terme à terme",
            OperationMatrice::Transposee => "Transposée de A",
            OperationMatrice::Rang => "Rang de A",
            OperationMatrice::Determinant => "Déterminant de A",
            OperationMatrice::Inverse => "Inverse de A",
        }
    }

    /// Vrai si l’opération consomme aussi B.
    pub fn est_binaire(self) -> bool {
        matches!(
            self,
            OperationMatrice::Addition
                | OperationMatrice::Soustraction
                | OperationMatrice::Produit
                | OperationMatrice::ProduitTermeATerme
        )
    }
}

impl fmt::Display for OperationMatrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.libelle())
    }
}

/// Avertissement non bloquant (le déterminant reste affiché).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Avis {
    MatriceSinguliere,
    /// |det| au-dessus du seuil, mais l’inverse sort de la plage des f64.
    InverseNonRepresentable,
}

impl fmt::Display for Avis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Avis::MatriceSinguliere => f.write_str("Matrice singulière : pas d’inverse."),
            Avis::InverseNonRepresentable => {
                f.write_str("Inverse non représentable en flottant (valeurs hors plage).")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Resultat {
    Matrice(Matrice),
    Rang(usize),
    /// Valeur brute (non arrondie).
    Determinant(f64),
    /// `inverse == None` <=> `avis` renseigné.
    Inverse {
        determinant: f64,
        inverse: Option<Matrice>,
        avis: Option<Avis>,
    },
}

/// Un bloc d’affichage (titre + texte monospace).
#[derive(Clone, Debug, PartialEq)]
pub struct Bloc {
    pub titre: String,
    pub texte: String,
}

impl Bloc {
    fn new(titre: &str, texte: String) -> Self {
        Self {
            titre: titre.to_string(),
            texte,
        }
    }
}

impl Resultat {
    pub fn avis(&self) -> Option<Avis> {
        match self {
            Resultat::Inverse { avis, .. } => *avis,
            _ => None,
        }
    }

    /// Blocs prêts à afficher (matrices en %g, déterminant arrondi).
    pub fn blocs(&self, reglages: &Reglages) -> Vec<Bloc> {
        let chiffres = reglages.chiffres_significatifs;
        match self {
            Resultat::Matrice(m) => vec![Bloc::new("Résultat", format_matrice(m, chiffres))],
            Resultat::Rang(r) => vec![Bloc::new("Rang(A)", r.to_string())],
            Resultat::Determinant(d) => vec![Bloc::new(
                "Déterminant",
                format_determinant(*d, reglages.decimales_determinant),
            )],
            Resultat::Inverse {
                determinant,
                inverse,
                ..
            } => {
                let mut out = vec![Bloc::new(
                    "Déterminant",
                    format_determinant(*determinant, reglages.decimales_determinant),
                )];
                if let Some(inv) = inverse {
                    out.push(Bloc::new("Inverse", format_matrice(inv, chiffres)));
                }
                out
            }
        }
    }
}

fn exiger_carree(a: &Matrice) -> Result<(), ErreurOperation> {
    if a.est_carree() {
        Ok(())
    } else {
        Err(ErreurOperation::NonCarree { forme: a.forme() })
    }
}

/// Applique `op` sur A (et B si binaire).
pub fn appliquer(
    op: OperationMatrice,
    a: &Matrice,
    b: Option<&Matrice>,
    reglages: &Reglages,
) -> Result<Resultat, ErreurOperation> {
    let binaire = |f: fn(&Matrice, &Matrice) -> Option<Matrice>| -> Result<Resultat, ErreurOperation> {
        let b = b.ok_or(ErreurOperation::OperandeManquant { op })?;
        f(a, b)
            .map(Resultat::Matrice)
            .ok_or(ErreurOperation::FormesIncompatibles {
                op,
                forme_a: a.forme(),
                forme_b: b.forme(),
            })
    };

    let res = match op {
        OperationMatrice::Addition => binaire(Matrice::somme)?,
        OperationMatrice::Soustraction => binaire(Matrice::difference)?,
        OperationMatrice::Produit => binaire(Matrice::produit)?,
        OperationMatrice::ProduitTermeATerme => binaire(Matrice::produit_hadamard)?,
        OperationMatrice::Transposee => Resultat::Matrice(a.transposee()),
        OperationMatrice::Rang => Resultat::Rang(algebre::rang(a)),
        OperationMatrice::Determinant => {
            exiger_carree(a)?;
            let det = algebre::determinant(a).ok_or(ErreurOperation::NonCarree { forme: a.forme() })?;
            Resultat::Determinant(det)
        }
        OperationMatrice::Inverse => {
            exiger_carree(a)?;
            let det = algebre::determinant(a).ok_or(ErreurOperation::NonCarree { forme: a.forme() })?;

            // Décision sur la valeur brute : l’arrondi n’intervient qu’à l’affichage.
            let (inverse, avis) = if det.abs() < reglages.seuil_singularite {
                warn!(det, forme = %a.forme(), "matrice singulière, inverse non calculée");
                (None, Some(Avis::MatriceSinguliere))
            } else {
                match algebre::inverse(a) {
                    Some(inv) => (Some(inv), None),
                    None => {
                        warn!(det, forme = %a.forme(), "inverse hors plage des f64");
                        (None, Some(Avis::InverseNonRepresentable))
                    }
                }
            };
            Resultat::Inverse {
                determinant: det,
                inverse,
                avis,
            }
        }
    };

    debug!(op = %op, forme_a = %a.forme(), "opération matricielle calculée");
    Ok(res)
}

/// Pipeline complet depuis le texte : B n’est lu que si l’opération l’exige.
pub fn calculer(
    op: OperationMatrice,
    texte_a: &str,
    texte_b: &str,
    reglages: &Reglages,
) -> Result<Resultat, ErreurCalcul> {
    let a = lire_matrice(texte_a).map_err(ErreurCalcul::lecture("A"))?;
    let b = if op.est_binaire() {
        Some(lire_matrice(texte_b).map_err(ErreurCalcul::lecture("B"))?)
    } else {
        None
    };
    Ok(appliquer(op, &a, b.as_ref(), reglages)?)
}
