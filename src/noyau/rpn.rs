// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la grammaire
// - Puis reconstruire Expr
//
// Règles:
// - Alternance stricte valeur / opérateur (pas de multiplication implicite)
// - '+'/'-' en position de valeur => unaire (Pos/Neg), préfixe
// - Précédences : + - (1) < * / (2) < unaire (3) < ** (4, associatif à droite)
//   => -2**2 = -(2**2) et 2**-1 = 2**(-1)
// - Fonction : doit être suivie de '(' ; un seul argument (pas de virgule dans la grammaire)
// - Garde-fou : pile d’opérateurs bornée (profondeur d’imbrication)

use super::erreurs::ErreurEval;
use super::expr::{Expr, OpBinaire};
use super::jetons::Tok;

/// Profondeur max de la pile d’opérateurs (parenthèses + unaires + ** en chaîne).
const PILE_MAX: usize = 256;

fn erreur(msg: impl Into<String>) -> ErreurEval {
    ErreurEval::SyntaxeOuInterdit(msg.into())
}

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg | Tok::Pos => 3,
        Tok::Puissance => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Puissance | Tok::Neg | Tok::Pos)
}

/// Opérateur “dépilable” (ni parenthèse, ni fonction).
fn est_operateur(t: &Tok) -> bool {
    precedence(t) > 0
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonc(sin), LPar, Const(pi), Slash, Num(2), RPar]
///   rpn:    [Const(pi), Num(2), Slash, Fonc(sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // true : le prochain jeton doit commencer une valeur
    let mut attend_valeur = true;

    for (idx, tok) in tokens.iter().cloned().enumerate() {
        match tok {
            Tok::Num(_) | Tok::Const(_) => {
                if !attend_valeur {
                    return Err(erreur("valeur inattendue (opérateur manquant)"));
                }
                out.push(tok);
                attend_valeur = false;
            }

            Tok::Fonc(f) => {
                if !attend_valeur {
                    return Err(erreur(format!("fonction {} inattendue", f.nom())));
                }
                if tokens.get(idx + 1) != Some(&Tok::LPar) {
                    return Err(erreur(format!("{} doit être appelée : {}(…)", f.nom(), f.nom())));
                }
                ops.push(tok);
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(erreur("appel sur une valeur qui n’est pas une fonction"));
                }
                ops.push(tok);
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(erreur("parenthèses vides ou opérande manquant"));
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(erreur("parenthèse fermante sans ouvrante")),
                    }
                }
                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Fonc(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
                attend_valeur = false;
            }

            Tok::Plus | Tok::Minus if attend_valeur => {
                // unaire : préfixe, ne dépile rien
                ops.push(if tok == Tok::Minus { Tok::Neg } else { Tok::Pos });
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Puissance => {
                if attend_valeur {
                    return Err(erreur("opérateur sans opérande à gauche"));
                }

                while let Some(top) = ops.last() {
                    if !est_operateur(top) {
                        break;
                    }
                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                attend_valeur = true;
            }

            Tok::Neg | Tok::Pos => return Err(erreur("jeton unaire inattendu en entrée")),
        }

        if ops.len() > PILE_MAX {
            return Err(erreur("expression trop imbriquée"));
        }
    }

    if attend_valeur {
        return Err(erreur("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar | Tok::Fonc(_)) {
            return Err(erreur("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Nombre(v)),
            Tok::Const(k) => st.push(Expr::Constante(k)),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Puissance => {
                let b = st.pop().ok_or_else(|| erreur("expression invalide"))?;
                let a = st.pop().ok_or_else(|| erreur("expression invalide"))?;

                let op = match tok {
                    Tok::Plus => OpBinaire::Add,
                    Tok::Minus => OpBinaire::Sub,
                    Tok::Star => OpBinaire::Mul,
                    Tok::Slash => OpBinaire::Div,
                    _ => OpBinaire::Pow,
                };
                st.push(Expr::binaire(op, a, b));
            }

            Tok::Neg => {
                let x = st.pop().ok_or_else(|| erreur("moins sans opérande"))?;
                st.push(Expr::Neg(Box::new(x)));
            }
            Tok::Pos => {
                // +x == x : rien à construire, mais l’opérande doit exister
                if st.is_empty() {
                    return Err(erreur("plus sans opérande"));
                }
            }

            Tok::Fonc(f) => {
                let x = st.pop().ok_or_else(|| erreur("fonction sans argument"))?;
                st.push(Expr::Appel(f, Box::new(x)));
            }

            Tok::LPar | Tok::RPar => return Err(erreur("parenthèse inattendue en RPN")),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(erreur("expression invalide")),
    }
}
