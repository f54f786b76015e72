// src/noyau/expr.rs
//
// AST flottant restreint par construction
// ---------------------------------------
// Noeuds possibles : littéral, constante (pi, e), moins unaire,
// binaire + - * / **, appel unaire d’une fonction de la liste blanche.
// Aucun autre noeud n’existe : pas d’attribut, pas d’indexation, pas d’affectation.

use std::f64::consts;

use super::erreurs::ErreurEval;
use super::trig::FonctionTrig;

/* ------------------------ Liste blanche ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => consts::PI,
            Constante::E => consts::E,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::E => "e",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Trig(FonctionTrig),
    Sqrt,
    Log,
    Exp,
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Trig(t) => t.nom(),
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Exp => "exp",
        }
    }

    /// Applique la fonction : NaN => erreur de domaine, ±inf => résultat non fini.
    pub fn appliquer(self, x: f64) -> Result<f64, ErreurEval> {
        let y = match self {
            Fonction::Trig(t) => return t.appliquer(x),
            Fonction::Sqrt => {
                if x < 0.0 {
                    return Err(ErreurEval::Domaine(format!("sqrt({x}) : argument négatif")));
                }
                x.sqrt()
            }
            Fonction::Log => {
                if x <= 0.0 {
                    return Err(ErreurEval::Domaine(format!("log({x}) : argument non positif")));
                }
                x.ln()
            }
            Fonction::Exp => x.exp(),
        };
        verifier_fini(y, self.nom(), x)
    }
}

/// Contrôle commun des sorties de fonctions.
pub(super) fn verifier_fini(y: f64, nom: &str, x: f64) -> Result<f64, ErreurEval> {
    if y.is_nan() {
        Err(ErreurEval::Domaine(format!("{nom}({x})")))
    } else if y.is_infinite() {
        Err(ErreurEval::ResultatNonFini(format!("{nom}({x}) déborde")))
    } else {
        Ok(y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Identifiant {
    Fonction(Fonction),
    Constante(Constante),
}

/// Les seuls noms résolubles. Sensible à la casse.
pub const LISTE_BLANCHE: [&str; 14] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "sqrt", "log", "exp",
    "pi", "e",
];

/// Résolution statique d’un identifiant : None si hors liste blanche.
pub fn resoudre(nom: &str) -> Option<Identifiant> {
    if !LISTE_BLANCHE.contains(&nom) {
        return None;
    }
    if let Some(t) = FonctionTrig::depuis_nom(nom) {
        return Some(Identifiant::Fonction(Fonction::Trig(t)));
    }
    let id = match nom {
        "sqrt" => Identifiant::Fonction(Fonction::Sqrt),
        "log" => Identifiant::Fonction(Fonction::Log),
        "exp" => Identifiant::Fonction(Fonction::Exp),
        "pi" => Identifiant::Constante(Constante::Pi),
        "e" => Identifiant::Constante(Constante::E),
        _ => return None,
    };
    Some(id)
}

/* ------------------------ AST ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl OpBinaire {
    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::Pow => "**",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Constante(Constante),
    Neg(Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn binaire(op: OpBinaire, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    /// Évaluation flottante. Toute valeur intermédiaire non finie est refusée.
    pub fn evaluer(&self) -> Result<f64, ErreurEval> {
        match self {
            Expr::Nombre(v) => {
                if v.is_finite() {
                    Ok(*v)
                } else {
                    Err(ErreurEval::ResultatNonFini("littéral hors des flottants".into()))
                }
            }
            Expr::Constante(c) => Ok(c.valeur()),
            Expr::Neg(x) => Ok(-x.evaluer()?),
            Expr::Appel(f, x) => f.appliquer(x.evaluer()?),
            Expr::Binaire(op, a, b) => {
                let a = a.evaluer()?;
                let b = b.evaluer()?;
                let y = match op {
                    OpBinaire::Add => a + b,
                    OpBinaire::Sub => a - b,
                    OpBinaire::Mul => a * b,
                    OpBinaire::Div => {
                        if b == 0.0 {
                            return Err(ErreurEval::DivisionParZero);
                        }
                        a / b
                    }
                    OpBinaire::Pow => puissance(a, b)?,
                };
                if y.is_finite() {
                    Ok(y)
                } else {
                    Err(ErreurEval::ResultatNonFini(format!(
                        "{a} {} {b} déborde",
                        op.symbole()
                    )))
                }
            }
        }
    }
}

/// a ** b sur les réels.
fn puissance(a: f64, b: f64) -> Result<f64, ErreurEval> {
    if a == 0.0 && b < 0.0 {
        return Err(ErreurEval::DivisionParZero);
    }
    if a < 0.0 && b.fract() != 0.0 {
        return Err(ErreurEval::Domaine(format!(
            "({a}) ** {b} : puissance fractionnaire d’un nombre négatif"
        )));
    }
    Ok(a.powf(b))
}

/* ------------------------ Affichage (démarche) ------------------------ */

/// Rendu totalement parenthésé de l’arbre (pour la démarche).
pub fn format_arbre(e: &Expr) -> String {
    match e {
        Expr::Nombre(v) => format!("{v}"),
        Expr::Constante(c) => c.nom().to_string(),
        Expr::Neg(x) => format!("-{}", format_arbre(x)),
        Expr::Appel(f, x) => format!("{}({})", f.nom(), format_arbre(x)),
        Expr::Binaire(op, a, b) => format!(
            "({} {} {})",
            format_arbre(a),
            op.symbole(),
            format_arbre(b)
        ),
    }
}
