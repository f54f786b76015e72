// src/noyau/format.rs
//
// Affichage des résultats
// -----------------------
// - matrices : `%g` à N chiffres significatifs, valeurs séparées par deux espaces
// - scalaires : plus courte écriture exacte (1.0, 0.49999999999999994, 1e-10)
// - déterminant : arrondi à D décimales AVANT affichage (jamais avant décision)

use super::matrice::Matrice;

/// "1.2500" -> "1.25", "3.000" -> "3", "40" -> "40"
fn retirer_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Exposant façon C : e+04, e-05, e+123.
fn exposant_c(exp: i32) -> String {
    let signe = if exp < 0 { '-' } else { '+' };
    format!("e{signe}{:02}", exp.unsigned_abs())
}

fn non_fini(x: f64) -> Option<String> {
    if x.is_nan() {
        Some("nan".into())
    } else if x.is_infinite() {
        Some(if x > 0.0 { "inf" } else { "-inf" }.into())
    } else {
        None
    }
}

/// Équivalent `%.{chiffres}g` :
/// - notation fixe si -4 <= exposant < chiffres
/// - sinon notation scientifique
/// - zéros de fin retirés
pub fn format_g(x: f64, chiffres: usize) -> String {
    if let Some(s) = non_fini(x) {
        return s;
    }
    let p = chiffres.max(1);
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.into();
    }

    // L’exposant se lit APRÈS arrondi à p chiffres (9.9999 -> 1.000e1).
    let sci = format!("{:.*e}", p - 1, x);
    let Some((mantisse, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= p as i32 {
        format!("{}{}", retirer_zeros(mantisse), exposant_c(exp))
    } else {
        let decimales = (p as i32 - 1 - exp).max(0) as usize;
        retirer_zeros(&format!("{x:.decimales$}"))
    }
}

/// Écriture la plus courte qui relit exactement la même valeur,
/// toujours avec un point décimal (1.0) ; exposant hors [1e-4, 1e16).
pub fn format_flottant(x: f64) -> String {
    if let Some(s) = non_fini(x) {
        return s;
    }
    let a = x.abs();
    if a != 0.0 && !(1e-4..1e16).contains(&a) {
        let sci = format!("{x:e}");
        return match sci.split_once('e') {
            Some((m, e)) => format!("{m}{}", exposant_c(e.parse().unwrap_or(0))),
            None => sci,
        };
    }
    let s = format!("{x}");
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

/// Arrondi à `decimales` décimales (demi vers l’extérieur).
/// Au-delà de 2^52 après mise à l’échelle, la valeur est déjà “entière” : inchangée.
pub fn arrondir(x: f64, decimales: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let echelle = 10f64.powi(decimales as i32);
    let y = x * echelle;
    if !y.is_finite() || y.abs() >= 4_503_599_627_370_496.0 {
        return x;
    }
    y.round() / echelle
}

/// Déterminant affiché : arrondi puis écriture courte.
pub fn format_determinant(det: f64, decimales: u32) -> String {
    format_flottant(arrondir(det, decimales))
}

/// Matrice affichée : lignes séparées par '\n', valeurs par deux espaces.
/// Relisible par lecture::lire_matrice.
pub fn format_matrice(m: &Matrice, chiffres: usize) -> String {
    m.lignes()
        .map(|ligne| {
            ligne
                .iter()
                .map(|&v| format_g(v, chiffres))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
