//! Noyau calcul (pur, sans état, sans UI)
//!
//! Organisation interne :
//! - matrice.rs    : type Matrice (rectangulaire, immuable) + Forme
//! - lecture.rs    : texte -> Matrice (validation)
//! - algebre.rs    : somme, produit, transposée, LU/det, Gauss-Jordan, rang (SVD)
//! - operations.rs : dispatch des opérations + avis “singulière”
//! - format.rs     : %g, écriture courte, arrondi du déterminant
//! - trig.rs       : unités + fonctions trig (enum fermée)
//! - jetons.rs     : tokenisation restreinte (liste blanche)
//! - rpn.rs        : shunting-yard + construction Expr
//! - expr.rs       : AST flottant + évaluation
//! - eval.rs       : pipeline expression complet
//! - erreurs.rs    : taxonomie des erreurs
//! - reglages.rs   : précisions d’affichage + seuils

pub mod algebre;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod matrice;
pub mod operations;
pub mod reglages;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{evaluer_expression, evaluer_expression_detaillee, DemarcheNoyau};
pub use format::format_flottant;
pub use operations::{calculer, OperationMatrice, Resultat};
pub use reglages::Reglages;
pub use trig::{evaluer_trig, FonctionTrig, Unite};
