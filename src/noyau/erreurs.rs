// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du noyau
// ------------------------------
// - ErreurLecture   : texte -> Matrice
// - ErreurOperation : validation des formes autour de l’algèbre
// - ErreurEval      : trig simple + expression
// - ErreurCalcul    : pipeline complet texte -> résultat (lecture + opération)
//
// Chaque message est destiné à l’utilisateur (affiché tel quel par la vue).

use thiserror::Error;

use super::matrice::Forme;
use super::operations::OperationMatrice;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurLecture {
    #[error("Entrée vide : aucune ligne de nombres")]
    EntreeVide,

    #[error("Jeton invalide « {jeton} » (ligne {ligne}) : nombre décimal attendu")]
    JetonInvalide { jeton: String, ligne: usize },

    #[error("Lignes de longueurs inégales : ligne {ligne} a {obtenu} valeur(s), {attendu} attendue(s)")]
    LignesInegales {
        ligne: usize,
        attendu: usize,
        obtenu: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurOperation {
    #[error("{op} : formes incompatibles A {forme_a} et B {forme_b}")]
    FormesIncompatibles {
        op: OperationMatrice,
        forme_a: Forme,
        forme_b: Forme,
    },

    #[error("La matrice doit être carrée (forme {forme})")]
    NonCarree { forme: Forme },

    #[error("{op} : la matrice B est requise")]
    OperandeManquant { op: OperationMatrice },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurEval {
    #[error("Nombre invalide « {0} »")]
    NombreInvalide(String),

    #[error("Erreur de domaine : {0}")]
    Domaine(String),

    #[error("Jeton interdit « {0} »")]
    JetonInterdit(String),

    #[error("Syntaxe invalide ou interdite : {0}")]
    SyntaxeOuInterdit(String),

    #[error("Division par zéro")]
    DivisionParZero,

    #[error("Résultat non fini ({0})")]
    ResultatNonFini(String),

    #[error("Expression trop longue : {longueur} caractères (max {max})")]
    ExpressionTropLongue { longueur: usize, max: usize },
}

/// Pipeline matrices : lecture (A et/ou B) puis opération.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErreurCalcul {
    #[error("Matrice {nom} : {source}")]
    Lecture {
        nom: &'static str,
        #[source]
        source: ErreurLecture,
    },

    #[error(transparent)]
    Operation(#[from] ErreurOperation),
}

impl ErreurCalcul {
    pub fn lecture(nom: &'static str) -> impl FnOnce(ErreurLecture) -> Self {
        move |source| ErreurCalcul::Lecture { nom, source }
    }
}
