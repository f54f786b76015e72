// src/noyau/matrice.rs
//
// Matrice dense f64 (ligne-major), rectangulaire, non vide.
// Invariant : lignes >= 1, colonnes >= 1, valeurs.len() == lignes * colonnes.
// Immuable une fois construite (pas de setter public).

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Forme {
    pub lignes: usize,
    pub colonnes: usize,
}

impl Forme {
    pub fn new(lignes: usize, colonnes: usize) -> Self {
        Self { lignes, colonnes }
    }
}

impl fmt::Display for Forme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.lignes, self.colonnes)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Matrice {
    forme: Forme,
    valeurs: Vec<f64>,
}

impl Matrice {
    /// Construit depuis des lignes. None si vide ou non rectangulaire.
    pub fn depuis_lignes(lignes: Vec<Vec<f64>>) -> Option<Self> {
        let nb_lignes = lignes.len();
        let nb_colonnes = lignes.first()?.len();
        if nb_colonnes == 0 || lignes.iter().any(|l| l.len() != nb_colonnes) {
            return None;
        }
        let valeurs = lignes.into_iter().flatten().collect();
        Some(Self {
            forme: Forme::new(nb_lignes, nb_colonnes),
            valeurs,
        })
    }

    /// Usage interne (algèbre) : la taille est garantie par construction.
    pub(super) fn depuis_brut(forme: Forme, valeurs: Vec<f64>) -> Self {
        debug_assert_eq!(valeurs.len(), forme.lignes * forme.colonnes);
        Self { forme, valeurs }
    }

    pub fn forme(&self) -> Forme {
        self.forme
    }

    pub fn nb_lignes(&self) -> usize {
        self.forme.lignes
    }

    pub fn nb_colonnes(&self) -> usize {
        self.forme.colonnes
    }

    pub fn est_carree(&self) -> bool {
        self.forme.lignes == self.forme.colonnes
    }

    pub fn valeurs(&self) -> &[f64] {
        &self.valeurs
    }

    #[cfg(test)]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.forme.lignes || j >= self.forme.colonnes {
            return None;
        }
        self.valeurs.get(i * self.forme.colonnes + j).copied()
    }

    /// Itère sur les lignes (tranches de longueur `colonnes`).
    pub fn lignes(&self) -> impl Iterator<Item = &[f64]> {
        self.valeurs.chunks(self.forme.colonnes)
    }

    #[cfg(test)]
    pub fn vers_lignes(&self) -> Vec<Vec<f64>> {
        self.lignes().map(<[f64]>::to_vec).collect()
    }
}
