//! Noyau — évaluation d’expression (pipeline réel)
//!
//! garde "__" -> garde longueur -> tokenize -> RPN -> Expr -> évaluation flottante
//!
//! Sûreté : l’arbre ne peut contenir que littéraux, pi/e, unaires, + - * / **
//! et appels aux fonctions de la liste blanche. Il n’existe aucun chemin vers
//! un nom hors liste : la résolution est faite à la tokenisation.

use tracing::debug;

use super::erreurs::ErreurEval;
use super::expr::format_arbre;
use super::jetons::{format_tokens, tokenize};
use super::reglages::Reglages;
use super::rpn::{from_rpn, to_rpn};

/// Séquence rejetée avant toute analyse.
const SEQUENCE_INTERDITE: &str = "__";

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// API publique : évalue une expression avec les réglages par défaut.
pub fn evaluer_expression(expr_str: &str) -> Result<f64, ErreurEval> {
    evaluer_expression_detaillee(expr_str, &Reglages::default()).map(|(v, _d)| v)
}

/// Évalue et retourne aussi la démarche (jetons, RPN, arbre).
pub fn evaluer_expression_detaillee(
    expr_str: &str,
    reglages: &Reglages,
) -> Result<(f64, DemarcheNoyau), ErreurEval> {
    let res = evaluer_interne(expr_str, reglages);
    match &res {
        Ok((v, _)) => debug!(expression = expr_str, resultat = *v, "expression évaluée"),
        Err(e) => debug!(expression = expr_str, erreur = %e, "expression refusée"),
    }
    res
}

fn evaluer_interne(
    expr_str: &str,
    reglages: &Reglages,
) -> Result<(f64, DemarcheNoyau), ErreurEval> {
    // 0) Gardes (avant toute analyse)
    if expr_str.contains(SEQUENCE_INTERDITE) {
        return Err(ErreurEval::JetonInterdit(SEQUENCE_INTERDITE.into()));
    }
    let longueur = expr_str.chars().count();
    if longueur > reglages.longueur_expression_max {
        return Err(ErreurEval::ExpressionTropLongue {
            longueur,
            max: reglages.longueur_expression_max,
        });
    }

    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurEval::SyntaxeOuInterdit("entrée vide".into()));
    }

    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;

    // 3) AST
    let arbre = from_rpn(&rpn)?;

    // 4) Valeur
    let v = arbre.evaluer()?;
    if !v.is_finite() {
        return Err(ErreurEval::ResultatNonFini(format!("{v}")));
    }

    let d = DemarcheNoyau {
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
        arbre: format_arbre(&arbre),
    };
    Ok((v, d))
}
