// src/noyau/trig.rs
//
// Trig “fonction seule” : angle (texte) + unité -> radians -> fonction
// -------------------------------------------------------------------
// - Unité : degrés convertis par x·π/180 avant application
// - Fonctions : enum fermée (pas de résolution dynamique par nom)
// - Domaine : NaN => erreur de domaine ; ±inf => résultat non fini

use std::fmt;

use tracing::debug;

use super::erreurs::ErreurEval;
use super::expr::verifier_fini;
use super::lecture::lire_nombre;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unite {
    Degres,
    Radians,
}

impl Unite {
    pub const TOUTES: [Unite; 2] = [Unite::Degres, Unite::Radians];

    pub fn libelle(self) -> &'static str {
        match self {
            Unite::Degres => "Degrés",
            Unite::Radians => "Radians",
        }
    }

    pub fn vers_radians(self, x: f64) -> f64 {
        match self {
            Unite::Degres => x.to_radians(),
            Unite::Radians => x,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FonctionTrig {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
}

impl FonctionTrig {
    pub const TOUTES: [FonctionTrig; 9] = [
        FonctionTrig::Sin,
        FonctionTrig::Cos,
        FonctionTrig::Tan,
        FonctionTrig::Asin,
        FonctionTrig::Acos,
        FonctionTrig::Atan,
        FonctionTrig::Sinh,
        FonctionTrig::Cosh,
        FonctionTrig::Tanh,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            FonctionTrig::Sin => "sin",
            FonctionTrig::Cos => "cos",
            FonctionTrig::Tan => "tan",
            FonctionTrig::Asin => "asin",
            FonctionTrig::Acos => "acos",
            FonctionTrig::Atan => "atan",
            FonctionTrig::Sinh => "sinh",
            FonctionTrig::Cosh => "cosh",
            FonctionTrig::Tanh => "tanh",
        }
    }

    pub fn depuis_nom(nom: &str) -> Option<Self> {
        Self::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    /// Applique la fonction à un angle en radians.
    pub fn appliquer(self, x: f64) -> Result<f64, ErreurEval> {
        let y = match self {
            FonctionTrig::Sin => x.sin(),
            FonctionTrig::Cos => x.cos(),
            FonctionTrig::Tan => x.tan(),
            FonctionTrig::Asin => x.asin(),
            FonctionTrig::Acos => x.acos(),
            FonctionTrig::Atan => x.atan(),
            FonctionTrig::Sinh => x.sinh(),
            FonctionTrig::Cosh => x.cosh(),
            FonctionTrig::Tanh => x.tanh(),
        };
        verifier_fini(y, self.nom(), x)
    }
}

impl fmt::Display for FonctionTrig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

/// Angle saisi : nombre décimal fini (espaces autour tolérés).
pub fn lire_angle(texte: &str) -> Result<f64, ErreurEval> {
    let t = texte.trim();
    lire_nombre(t).ok_or_else(|| ErreurEval::NombreInvalide(t.to_string()))
}

/// API publique : fonction + angle texte + unité.
pub fn evaluer_trig(f: FonctionTrig, texte_angle: &str, unite: Unite) -> Result<f64, ErreurEval> {
    let x = lire_angle(texte_angle)?;
    let rad = unite.vers_radians(x);
    let y = f.appliquer(rad)?;
    debug!(fonction = f.nom(), angle = x, unite = unite.libelle(), resultat = y, "trig évaluée");
    Ok(y)
}
