// src/noyau/jetons.rs
//
// Tokenisation restreinte
// -----------------------
// Seuls jetons possibles :
// - nombres décimaux (12, 1.5, .5, 1., 2e-3)
// - identifiants de la liste blanche (résolus ICI : fonction ou constante)
// - opérateurs + - * / **
// - parenthèses ( )
// Tout autre caractère ou nom => SyntaxeOuInterdit.

use super::erreurs::ErreurEval;
use super::expr::{resoudre, Constante, Fonction, Identifiant};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Const(Constante),
    Fonc(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Puissance, // **

    // Produits par la RPN seulement (classement du +/- unaire).
    Neg,
    Pos,

    LPar,
    RPar,
}

fn erreur(msg: impl Into<String>) -> ErreurEval {
    ErreurEval::SyntaxeOuInterdit(msg.into())
}

/// Lit un nombre à partir de `i` ; renvoie (valeur, nouvel indice).
fn lire_nombre_a(chars: &[char], mut i: usize) -> Result<(f64, usize), ErreurEval> {
    let start = i;
    let mut chiffres = 0usize;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
        chiffres += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
            chiffres += 1;
        }
    }
    if chiffres == 0 {
        return Err(erreur("point isolé"));
    }

    // Exposant seulement s’il est complet (e, signe optionnel, au moins un chiffre).
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let texte: String = chars[start..i].iter().collect();
    let v = texte
        .parse::<f64>()
        .map_err(|_| erreur(format!("nombre mal formé « {texte} »")))?;
    Ok((v, i))
}

/// Tokenize une expression.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Puissance);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            _ => {}
        }

        // Nombres : chiffre, ou '.' suivi d’un chiffre
        if c.is_ascii_digit() || c == '.' {
            let (v, j) = lire_nombre_a(&chars, i)?;
            out.push(Tok::Num(v));
            i = j;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*, résolus sur la liste blanche
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            match resoudre(&mot) {
                Some(Identifiant::Fonction(f)) => out.push(Tok::Fonc(f)),
                Some(Identifiant::Constante(k)) => out.push(Tok::Const(k)),
                None => return Err(erreur(format!("nom non autorisé « {mot} »"))),
            }
            continue;
        }

        return Err(erreur(format!("caractère inattendu « {c} »")));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Const(k) => k.nom().to_string(),
            Tok::Fonc(f) => f.nom().to_string(),
            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Puissance => "**".to_string(),
            Tok::Neg => "neg".to_string(),
            Tok::Pos => "pos".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::trig::FonctionTrig;

    #[test]
    fn jetons_de_base() {
        let t = tokenize("sin(pi/6) + 2**-1").unwrap();
        assert_eq!(
            t,
            vec![
                Tok::Fonc(Fonction::Trig(FonctionTrig::Sin)),
                Tok::LPar,
                Tok::Const(Constante::Pi),
                Tok::Slash,
                Tok::Num(6.0),
                Tok::RPar,
                Tok::Plus,
                Tok::Num(2.0),
                Tok::Puissance,
                Tok::Minus,
                Tok::Num(1.0),
            ]
        );
    }

    #[test]
    fn nombres_varies() {
        let t = tokenize("1.5 .5 3. 2e3 4E-2").unwrap();
        assert_eq!(
            t,
            vec![Tok::Num(1.5), Tok::Num(0.5), Tok::Num(3.0), Tok::Num(2000.0), Tok::Num(0.04)]
        );
    }

    #[test]
    fn exposant_incomplet_laisse_e() {
        // "2e" => 2 puis la constante e (la RPN refusera la juxtaposition)
        let t = tokenize("2e").unwrap();
        assert_eq!(t, vec![Tok::Num(2.0), Tok::Const(Constante::E)]);
    }

    #[test]
    fn refuse_noms_hors_liste() {
        for s in ["x + 1", "abs(1)", "Sin(1)", "PI", "import", "a_b"] {
            assert!(
                matches!(tokenize(s), Err(ErreurEval::SyntaxeOuInterdit(_))),
                "{s:?}"
            );
        }
    }

    #[test]
    fn refuse_caracteres_hors_grammaire() {
        for s in ["2^3", "[1]", "a.b", "1,2", "'x'", "x=1", "1;2", "π", "."] {
            assert!(
                matches!(tokenize(s), Err(ErreurEval::SyntaxeOuInterdit(_))),
                "{s:?}"
            );
        }
    }

    #[test]
    fn format_jetons() {
        let t = tokenize("exp(1) * 2").unwrap();
        assert_eq!(format_tokens(&t), "exp ( 1 ) * 2");
    }
}
