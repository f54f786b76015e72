//! src/app/etat.rs
//!
//! État UI (sans vue, sans évaluation).
//!
//! Rôle : contenir les saisies (matrices, angle, expression), les sélections
//! (opération, fonction, unité) et les sorties déjà formatées de chaque action.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing, pas de calcul).
//! - Chaque action a sa propre sortie : une erreur n’efface pas les autres sections.
//! - Un avis (matrice singulière) n’est pas une erreur : il s’affiche à côté du résultat.

use crate::noyau::{DemarcheNoyau, FonctionTrig, OperationMatrice, Reglages, Unite};

const TEXTE_A_DEFAUT: &str = "1 2\n3 4";
const TEXTE_B_DEFAUT: &str = "5 6\n7 8";
const TEXTE_M_DEFAUT: &str = "2 1\n5 3";
const ANGLE_DEFAUT: &str = "30";
const EXPRESSION_DEFAUT: &str = "sin(pi/6) + cos(pi/3)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OngletMatrices {
    Operations,
    DeterminantInverse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OngletTrig {
    Fonction,
    Expression,
}

/// Sortie d’une action : blocs (titre, texte) OU erreur ; avis optionnel.
#[derive(Clone, Default, Debug)]
pub struct Sortie {
    pub blocs: Vec<(String, String)>,
    pub avis: String,
    pub erreur: String,
}

impl Sortie {
    pub fn clear(&mut self) {
        self.blocs.clear();
        self.avis.clear();
        self.erreur.clear();
    }

    /// Erreur : le résultat est supprimé, seul le message reste.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.clear();
        self.erreur = msg.into();
    }

    pub fn set_resultat(&mut self, blocs: Vec<(String, String)>, avis: Option<String>) {
        self.clear();
        self.blocs = blocs;
        if let Some(a) = avis {
            self.avis = a;
        }
    }

    pub fn est_vide(&self) -> bool {
        self.blocs.is_empty() && self.avis.is_empty() && self.erreur.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- matrices ---
    pub onglet_matrices: OngletMatrices,
    pub texte_a: String,
    pub texte_b: String,
    pub operation: OperationMatrice,
    pub sortie_operation: Sortie,
    pub texte_m: String,
    pub sortie_det: Sortie,

    // --- trigonométrie ---
    pub onglet_trig: OngletTrig,
    pub fonction: FonctionTrig,
    pub unite: Unite,
    pub angle: String,
    pub sortie_trig: Sortie,
    pub expression: String,
    pub sortie_expression: Sortie,
    /// Vide tant que “Démarche” n’a pas été demandée.
    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub reglages: Reglages,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            onglet_matrices: OngletMatrices::Operations,
            texte_a: TEXTE_A_DEFAUT.to_string(),
            texte_b: TEXTE_B_DEFAUT.to_string(),
            operation: OperationMatrice::Addition,
            sortie_operation: Sortie::default(),
            texte_m: TEXTE_M_DEFAUT.to_string(),
            sortie_det: Sortie::default(),

            onglet_trig: OngletTrig::Fonction,
            fonction: FonctionTrig::Sin,
            unite: Unite::Degres,
            angle: ANGLE_DEFAUT.to_string(),
            sortie_trig: Sortie::default(),
            expression: EXPRESSION_DEFAUT.to_string(),
            sortie_expression: Sortie::default(),
            demarche: DemarcheNoyau::default(),

            reglages: Reglages::default().bornes(),
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// Esc : efface les sorties des onglets visibles (pas les saisies).
    pub fn clear_sorties_visibles(&mut self) {
        match self.onglet_matrices {
            OngletMatrices::Operations => self.sortie_operation.clear(),
            OngletMatrices::DeterminantInverse => self.sortie_det.clear(),
        }
        match self.onglet_trig {
            OngletTrig::Fonction => self.sortie_trig.clear(),
            OngletTrig::Expression => {
                self.sortie_expression.clear();
                self.demarche = DemarcheNoyau::default();
            }
        }
    }

    /// Remise à zéro totale : saisies par défaut + sorties vides.
    pub fn reset_total(&mut self) {
        *self = Self::default();
    }

    /// Erreur d’expression : la démarche n’est plus fiable.
    pub fn set_erreur_expression(&mut self, msg: impl Into<String>) {
        self.sortie_expression.set_erreur(msg);
        self.demarche = DemarcheNoyau::default();
    }
}
