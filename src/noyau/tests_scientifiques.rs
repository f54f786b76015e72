//! Tests scientifiques (campagne) : invariants + scénarios + limites contrôlées.
//!
//! But : vérifier les propriétés du noyau sur des familles d’entrées,
//! sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (matrices <= 12×12)
//!
//! Notes :
//! - Les valeurs affichées passent par `%.4g` : l’aller-retour texte est exact
//!   à 4 chiffres significatifs près, pas plus.
//! - Le seuil de singularité porte sur la valeur BRUTE du déterminant.

use std::time::{Duration, Instant};

use super::erreurs::{ErreurEval, ErreurLecture, ErreurOperation};
use super::format::format_matrice;
use super::lecture::lire_matrice;
use super::operations::{appliquer, calculer, Avis, OperationMatrice, Resultat};
use super::reglages::Reglages;
use super::trig::{evaluer_trig, FonctionTrig, Unite};
use super::evaluer_expression;

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Texte d’une matrice l×c, valeurs déterministes non triviales.
fn texte_matrice(l: usize, c: usize, graine: i64) -> String {
    (0..l)
        .map(|i| {
            (0..c)
                .map(|j| {
                    let v = ((i as i64 * 7 + j as i64 * 3 + graine) % 11) - 5;
                    format!("{v}")
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn matrice_resultat(res: Resultat) -> Vec<Vec<f64>> {
    match res {
        Resultat::Matrice(m) => m.vers_lignes(),
        autre => panic!("matrice attendue: {autre:?}"),
    }
}

/* ------------------------ Scénarios de référence ------------------------ */

#[test]
fn sci_scenarios_reference() {
    let r = Reglages::default();

    // 1) lecture
    assert_eq!(
        lire_matrice("1 2\n3 4").unwrap().vers_lignes(),
        vec![vec![1.0, 2.0], vec![3.0, 4.0]]
    );

    // 2) addition
    let somme = calculer(OperationMatrice::Addition, "1 2\n3 4", "5 6\n7 8", &r).unwrap();
    assert_eq!(matrice_resultat(somme), vec![vec![6.0, 8.0], vec![10.0, 12.0]]);

    // 3) + 4) déterminant et inverse
    let res = calculer(OperationMatrice::Inverse, "2 1\n5 3", "", &r).unwrap();
    let blocs = res.blocs(&r);
    assert_eq!(blocs[0].texte, "1.0");
    assert_eq!(blocs[1].texte, "3  -1\n-5  2");

    // 5) trig
    let y = evaluer_trig(FonctionTrig::Sin, "30", Unite::Degres).unwrap();
    assert!((y - 0.5).abs() < 1e-12);

    // 6) expression + garde
    let v = evaluer_expression("sin(pi/6) + cos(pi/3)").unwrap();
    assert!((v - 1.0).abs() < 1e-12);
    assert_eq!(
        evaluer_expression("__import__('os').system('ls')"),
        Err(ErreurEval::JetonInterdit("__".into()))
    );
}

/* ------------------------ Lecture : formes ------------------------ */

#[test]
fn sci_lecture_forme_exacte() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    for l in 1..=8 {
        for c in 1..=8 {
            budget(t0, max);
            let m = lire_matrice(&texte_matrice(l, c, 1)).unwrap();
            assert_eq!((m.nb_lignes(), m.nb_colonnes()), (l, c));
        }
    }
}

#[test]
fn sci_lecture_irreguliere_toujours_refusee() {
    for l in 2..=6 {
        for c in 1..=6 {
            let mut texte = texte_matrice(l, c, 2);
            texte.push_str(" 9"); // dernière ligne : une valeur de trop
            assert!(
                matches!(lire_matrice(&texte), Err(ErreurLecture::LignesInegales { .. })),
                "{l}×{c}"
            );
        }
    }
}

/* ------------------------ Opérations : domaine de définition ------------------------ */

#[test]
fn sci_addition_definie_ssi_memes_formes() {
    let r = Reglages::default();
    for (la, ca) in [(1, 1), (2, 3), (3, 2)] {
        for (lb, cb) in [(1, 1), (2, 3), (3, 2)] {
            let a = lire_matrice(&texte_matrice(la, ca, 3)).unwrap();
            let b = lire_matrice(&texte_matrice(lb, cb, 4)).unwrap();
            for op in [OperationMatrice::Addition, OperationMatrice::Soustraction] {
                let res = appliquer(op, &a, Some(&b), &r);
                if (la, ca) == (lb, cb) {
                    assert!(res.is_ok());
                } else {
                    assert!(matches!(res, Err(ErreurOperation::FormesIncompatibles { .. })));
                }
            }
        }
    }
}

#[test]
fn sci_produit_defini_ssi_dimensions_internes() {
    let r = Reglages::default();
    for (la, ca) in [(1, 2), (2, 3), (3, 3)] {
        for (lb, cb) in [(2, 1), (3, 2), (2, 2)] {
            let a = lire_matrice(&texte_matrice(la, ca, 5)).unwrap();
            let b = lire_matrice(&texte_matrice(lb, cb, 6)).unwrap();
            let res = appliquer(OperationMatrice::Produit, &a, Some(&b), &r);
            if ca == lb {
                let Ok(Resultat::Matrice(p)) = res else {
                    panic!("produit {la}×{ca} · {lb}×{cb} attendu")
                };
                assert_eq!((p.nb_lignes(), p.nb_colonnes()), (la, cb));
            } else {
                assert!(matches!(res, Err(ErreurOperation::FormesIncompatibles { .. })));
            }
        }
    }
}

#[test]
fn sci_transposee_involutive_et_rang_invariant() {
    let r = Reglages::default();
    for (l, c) in [(1, 4), (3, 2), (4, 4), (5, 3)] {
        let a = lire_matrice(&texte_matrice(l, c, 7)).unwrap();
        let t = a.transposee();
        assert_eq!(t.transposee(), a);

        let ra = appliquer(OperationMatrice::Rang, &a, None, &r).unwrap();
        let rt = appliquer(OperationMatrice::Rang, &t, None, &r).unwrap();
        assert_eq!(ra, rt);
        let Resultat::Rang(k) = ra else { panic!("rang attendu") };
        assert!(k <= l.min(c));
    }
}

/* ------------------------ Inverse : seuil de singularité ------------------------ */

#[test]
fn sci_inverse_ssi_det_au_dessus_du_seuil() {
    let r = Reglages::default();
    for (texte, singuliere) in [
        ("1 2\n2 4", true),
        ("0 0\n0 0", true),
        ("1 2 3\n4 5 6\n7 8 9", true),
        ("1e-7 0\n0 1e-7", true), // det = 1e-14
        ("1e-6 0\n0 1e-6", false), // det = 1e-12 : pile au seuil => inversible
        ("4 7\n2 6", false),
        ("2 0 0\n0 3 0\n0 0 4", false),
    ] {
        let res = calculer(OperationMatrice::Inverse, texte, "", &r).unwrap();
        assert_eq!(
            res.avis() == Some(Avis::MatriceSinguliere),
            singuliere,
            "{texte:?} => {res:?}"
        );
    }
}

#[test]
fn sci_inverse_fois_a_identite() {
    let r = Reglages::default();
    let a = lire_matrice("4 -2 1\n3 6 -4\n2 1 8").unwrap();
    let Resultat::Inverse {
        inverse: Some(inv), ..
    } = appliquer(OperationMatrice::Inverse, &a, None, &r).unwrap()
    else {
        panic!("inverse attendue")
    };
    let id = a.produit(&inv).unwrap();
    for (i, ligne) in id.lignes().enumerate() {
        for (j, v) in ligne.iter().enumerate() {
            let attendu = if i == j { 1.0 } else { 0.0 };
            assert!((v - attendu).abs() < 1e-12, "({i},{j}) = {v}");
        }
    }
}

/* ------------------------ Aller-retour affichage ------------------------ */

#[test]
fn sci_aller_retour_format_lecture() {
    let r = Reglages::default();
    let a = lire_matrice("0.333333 -1234567\n6.02214076e23 -1.5e-9\n42 0").unwrap();
    let texte = format_matrice(&a, r.chiffres_significatifs);
    let b = lire_matrice(&texte).unwrap();
    assert_eq!(a.forme(), b.forme());
    for (x, y) in a.valeurs().iter().zip(b.valeurs()) {
        assert!((x - y).abs() <= x.abs() * 5e-4, "{x} vs {y} (texte {texte:?})");
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_determinant_12x12() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Diagonale dominante => bien conditionnée, inversible
    let n = 12;
    let texte = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { "20".to_string() } else { format!("{}", (i + j) % 3) })
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let res = calculer(OperationMatrice::Inverse, &texte, "", &Reglages::default()).unwrap();
    budget(t0, max);
    assert_eq!(res.avis(), None);
}
