//! Tests fuzz safe : robustesse + déterminisme + sûreté de l’évaluateur.
//!
//! But : marteler les entrées texte sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : jamais de panique, jamais de valeur non finie en sortie,
//!   jamais de nom hors liste blanche résolu

use std::time::{Duration, Instant};

use super::erreurs::{ErreurEval, ErreurLecture};
use super::lecture::lire_matrice;
use super::operations::{calculer, OperationMatrice};
use super::reglages::Reglages;
use super::evaluer_expression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choisir<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const FONCTIONS: [&str; 12] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "sqrt", "log", "exp",
];

const INTRUS: [&str; 10] = [
    "__import__", "os", "open", "eval", "x", "abs", "globals", "lambda", "exec", "__class__",
];

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => format!("{}", rng.pick(10)),
        3 => format!("{}.{}", rng.pick(5), rng.pick(100)),
        4 => format!("{}e-{}", 1 + rng.pick(9), rng.pick(3)),
        _ => format!("{}", 1 + rng.pick(9)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(9) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}**{})", gen_expr(rng, depth - 1), gen_atom(rng)),
        6 => format!("-{}", gen_expr(rng, depth - 1)),
        _ => {
            let f = rng.choisir(&FONCTIONS);
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
    }
}

/// Déforme une expression valide (caractère parasite, intrus, coupe).
fn gen_mutant(rng: &mut Rng) -> String {
    let base = gen_expr(rng, 3);
    match rng.pick(5) {
        0 => format!("{base}{}", rng.choisir(&["^2", ",1", "[0]", ".real", ")", "("])),
        1 => format!("{}({base})", rng.choisir(&INTRUS)),
        2 => format!("{base} + {}", rng.choisir(&INTRUS)),
        3 => {
            let coupe = rng.pick(base.chars().count() as u32) as usize;
            base.chars().take(coupe).collect()
        }
        _ => format!("{base} {base}"),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_valides_finies_ou_erreur_numerique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match evaluer_expression(&expr) {
            Ok(v) => {
                assert!(v.is_finite(), "valeur non finie pour {expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                // Grammaire valide => seules les erreurs numériques sont acceptables.
                assert!(
                    matches!(
                        e,
                        ErreurEval::DivisionParZero
                            | ErreurEval::Domaine(_)
                            | ErreurEval::ResultatNonFini(_)
                    ),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme() {
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);
    for _ in 0..50 {
        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);
        assert_eq!(evaluer_expression(&ea), evaluer_expression(&eb));
    }
}

#[test]
fn fuzz_safe_mutants_refuses_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xFEED_u64);

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_mutant(&mut rng);
        // Invariant : jamais de panique, et tout “__” est refusé en premier.
        let res = evaluer_expression(&expr);
        if expr.contains("__") {
            assert_eq!(res, Err(ErreurEval::JetonInterdit("__".into())), "{expr:?}");
        }
        if let Ok(v) = res {
            assert!(v.is_finite());
        }
    }
}

#[test]
fn fuzz_safe_intrus_jamais_resolus() {
    let mut rng = Rng::new(0x5EED_u64);
    for _ in 0..100 {
        let intrus = rng.choisir(&INTRUS);
        let expr = if rng.coin() {
            intrus.to_string()
        } else {
            format!("1 + {intrus}(2)")
        };
        assert!(
            matches!(
                evaluer_expression(&expr),
                Err(ErreurEval::JetonInterdit(_)) | Err(ErreurEval::SyntaxeOuInterdit(_))
            ),
            "{expr:?} aurait dû être refusé"
        );
    }
}

#[test]
fn fuzz_safe_chaine_longue_sans_debordement_de_pile() {
    // Somme longue (arbre profond à gauche) sous la limite de longueur.
    let expr = vec!["1"; 900].join("+");
    assert!(expr.chars().count() <= Reglages::default().longueur_expression_max);
    assert_eq!(evaluer_expression(&expr), Ok(900.0));
}

#[test]
fn fuzz_safe_lecture_matrices() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xABCDEF_u64);
    let morceaux = ["1", "-2.5", "3e2", ",", " ", "\n", "x", "1e999", "\t", ".", "0"];

    for _ in 0..300 {
        budget(t0, max);

        let n = 1 + rng.pick(12) as usize;
        let texte: String = (0..n).map(|_| rng.choisir(&morceaux)).collect();

        match lire_matrice(&texte) {
            Ok(m) => {
                assert!(m.nb_lignes() >= 1 && m.nb_colonnes() >= 1);
                assert!(m.valeurs().iter().all(|v| v.is_finite()));
                // toutes les opérations unaires doivent répondre sans paniquer
                for op in OperationMatrice::TOUTES {
                    let _ = calculer(op, &texte, &texte, &Reglages::default());
                }
            }
            Err(ErreurLecture::EntreeVide)
            | Err(ErreurLecture::JetonInvalide { .. })
            | Err(ErreurLecture::LignesInegales { .. }) => {}
        }
    }
}
