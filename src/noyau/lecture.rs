// src/noyau/lecture.rs
//
// Lecture texte -> Matrice
// ------------------------
// Format (bidirectionnel avec format::format_matrice) :
// - une ligne de texte = une ligne de matrice
// - nombres séparés par espaces et/ou virgules
// - pas d’en-tête, pas de dimensions
//
// Lignes blanches (ou seulement séparateurs) ignorées.

use tracing::debug;

use super::erreurs::ErreurLecture;
use super::matrice::Matrice;

/// Séparateurs de jetons dans une ligne.
fn est_separateur(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Nombre décimal fini : signe optionnel, entier ou flottant, exposant optionnel.
/// Refuse explicitement inf / nan (acceptés par `f64::from_str`).
pub fn lire_nombre(jeton: &str) -> Option<f64> {
    let ok_syntaxe = jeton
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !ok_syntaxe || !jeton.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    jeton.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lit une matrice depuis du texte libre.
///
/// Erreurs:
/// - EntreeVide si aucune ligne utile
/// - JetonInvalide { jeton, ligne } (ligne numérotée à partir de 1)
/// - LignesInegales si les longueurs diffèrent de la première ligne
pub fn lire_matrice(texte: &str) -> Result<Matrice, ErreurLecture> {
    let mut lignes: Vec<Vec<f64>> = Vec::new();

    for brute in texte.lines() {
        let jetons: Vec<&str> = brute
            .split(est_separateur)
            .filter(|j| !j.is_empty())
            .collect();
        if jetons.is_empty() {
            continue;
        }

        let numero = lignes.len() + 1;
        let mut valeurs = Vec::with_capacity(jetons.len());
        for j in jetons {
            let v = lire_nombre(j).ok_or_else(|| ErreurLecture::JetonInvalide {
                jeton: j.to_string(),
                ligne: numero,
            })?;
            valeurs.push(v);
        }

        if let Some(premiere) = lignes.first() {
            if premiere.len() != valeurs.len() {
                return Err(ErreurLecture::LignesInegales {
                    ligne: numero,
                    attendu: premiere.len(),
                    obtenu: valeurs.len(),
                });
            }
        }

        lignes.push(valeurs);
    }

    let m = Matrice::depuis_lignes(lignes).ok_or(ErreurLecture::EntreeVide)?;
    debug!(forme = %m.forme(), "matrice lue");
    Ok(m)
}
