//! Réglages du noyau (affichage + seuils).
//!
//! Pas de fichier ni de variable d’environnement : valeurs par défaut fixes,
//! bornées par des garde-fous (comme ΣLocal côté UI).

/// Chiffres significatifs pour l’affichage des matrices (style `%.4g`).
pub const CHIFFRES_DEFAUT: usize = 4;

/// Arrondi d’affichage du déterminant.
pub const DECIMALES_DET_DEFAUT: u32 = 10;

/// |det| < seuil => matrice singulière (comparaison sur la valeur NON arrondie).
pub const SEUIL_SINGULARITE: f64 = 1e-12;

/// Garde-fou anti-pile : longueur maximale d’une expression.
pub const LONGUEUR_EXPRESSION_DEFAUT: usize = 2000;

const CHIFFRES_MAX: usize = 17;
const DECIMALES_DET_MAX: u32 = 15;
const LONGUEUR_EXPRESSION_MAX: usize = 10_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Reglages {
    pub chiffres_significatifs: usize,
    pub decimales_determinant: u32,
    pub seuil_singularite: f64,
    pub longueur_expression_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            chiffres_significatifs: CHIFFRES_DEFAUT,
            decimales_determinant: DECIMALES_DET_DEFAUT,
            seuil_singularite: SEUIL_SINGULARITE,
            longueur_expression_max: LONGUEUR_EXPRESSION_DEFAUT,
        }
    }
}

impl Reglages {
    /// Borne chaque champ dans son domaine utile.
    pub fn bornes(mut self) -> Self {
        self.chiffres_significatifs = self.chiffres_significatifs.clamp(1, CHIFFRES_MAX);
        self.decimales_determinant = self.decimales_determinant.min(DECIMALES_DET_MAX);
        if !self.seuil_singularite.is_finite() || self.seuil_singularite < 0.0 {
            self.seuil_singularite = SEUIL_SINGULARITE;
        }
        self.longueur_expression_max = self
            .longueur_expression_max
            .clamp(1, LONGUEUR_EXPRESSION_MAX);
        self
    }
}
