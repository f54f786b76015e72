// src/noyau/algebre.rs
//
// Algèbre linéaire dense (petites matrices, O(n³) au pire)
// -------------------------------------------------------
// - somme / différence / Hadamard / produit / transposée
// - déterminant : LU avec pivot partiel
// - inverse     : Gauss-Jordan avec pivot partiel
// - rang        : valeurs singulières (Jacobi à un côté, matrice ramenée à max|a_ij| = 1),
//                 tolérance σmax·max(m,n)·ε
//
// Aucune validation “utilisateur” ici : les formes incompatibles donnent None,
// la traduction en erreurs se fait dans operations.rs.

use super::matrice::{Forme, Matrice};

/// Balayages max pour Jacobi (converge en < 10 pour les tailles visées).
const BALAYAGES_MAX: usize = 60;

impl Matrice {
    fn combiner(&self, autre: &Matrice, f: impl Fn(f64, f64) -> f64) -> Option<Matrice> {
        if self.forme() != autre.forme() {
            return None;
        }
        let valeurs = self
            .valeurs()
            .iter()
            .zip(autre.valeurs())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Some(Matrice::depuis_brut(self.forme(), valeurs))
    }

    pub fn somme(&self, autre: &Matrice) -> Option<Matrice> {
        self.combiner(autre, |a, b| a + b)
    }

    pub fn difference(&self, autre: &Matrice) -> Option<Matrice> {
        self.combiner(autre, |a, b| a - b)
    }

    /// Produit terme à terme (Hadamard).
    pub fn produit_hadamard(&self, autre: &Matrice) -> Option<Matrice> {
        self.combiner(autre, |a, b| a * b)
    }

    /// Produit matriciel A·B (colonnes(A) == lignes(B)).
    pub fn produit(&self, autre: &Matrice) -> Option<Matrice> {
        let (n, k) = (self.nb_lignes(), self.nb_colonnes());
        let p = autre.nb_colonnes();
        if k != autre.nb_lignes() {
            return None;
        }

        let a = self.valeurs();
        let b = autre.valeurs();
        let mut out = vec![0.0; n * p];
        for i in 0..n {
            for t in 0..k {
                let ait = a[i * k + t];
                for j in 0..p {
                    out[i * p + j] += ait * b[t * p + j];
                }
            }
        }
        Some(Matrice::depuis_brut(Forme::new(n, p), out))
    }

    pub fn transposee(&self) -> Matrice {
        let (n, m) = (self.nb_lignes(), self.nb_colonnes());
        let a = self.valeurs();
        let mut out = vec![0.0; n * m];
        for i in 0..n {
            for j in 0..m {
                out[j * n + i] = a[i * m + j];
            }
        }
        Matrice::depuis_brut(Forme::new(m, n), out)
    }
}

/* ------------------------ Pivot partiel ------------------------ */

/// Indice de la ligne (dans k..n) dont |a[i][col]| est maximal.
fn ligne_pivot(a: &[f64], largeur: usize, k: usize, n: usize, col: usize) -> usize {
    let mut best = k;
    let mut best_abs = a[k * largeur + col].abs();
    for i in (k + 1)..n {
        let v = a[i * largeur + col].abs();
        if v > best_abs {
            best = i;
            best_abs = v;
        }
    }
    best
}

fn echanger_lignes(a: &mut [f64], largeur: usize, i: usize, j: usize) {
    if i == j {
        return;
    }
    for t in 0..largeur {
        a.swap(i * largeur + t, j * largeur + t);
    }
}

/* ------------------------ Déterminant (LU) ------------------------ */

/// Déterminant par élimination LU (pivot partiel). None si non carrée.
///
/// Valeur NON arrondie : l’arrondi d’affichage se fait dans format.rs,
/// la décision “singulière” se prend sur cette valeur brute.
pub fn determinant(m: &Matrice) -> Option<f64> {
    if !m.est_carree() {
        return None;
    }
    let n = m.nb_lignes();
    let mut a = m.valeurs().to_vec();
    let mut det = 1.0;

    for k in 0..n {
        let p = ligne_pivot(&a, n, k, n, k);
        if a[p * n + k] == 0.0 {
            return Some(0.0);
        }
        if p != k {
            echanger_lignes(&mut a, n, p, k);
            det = -det;
        }

        let pivot = a[k * n + k];
        det *= pivot;

        for i in (k + 1)..n {
            let facteur = a[i * n + k] / pivot;
            if facteur == 0.0 {
                continue;
            }
            for j in k..n {
                a[i * n + j] -= facteur * a[k * n + j];
            }
        }
    }

    Some(det)
}

/* ------------------------ Inverse (Gauss-Jordan) ------------------------ */

/// Inverse par Gauss-Jordan sur [A | I]. None si non carrée ou pivot nul.
pub fn inverse(m: &Matrice) -> Option<Matrice> {
    if !m.est_carree() {
        return None;
    }
    let n = m.nb_lignes();
    let w = 2 * n;

    let mut a = vec![0.0; n * w];
    for (i, ligne) in m.lignes().enumerate() {
        a[i * w..i * w + n].copy_from_slice(ligne);
        a[i * w + n + i] = 1.0;
    }

    for k in 0..n {
        let p = ligne_pivot(&a, w, k, n, k);
        if a[p * w + k] == 0.0 {
            return None;
        }
        echanger_lignes(&mut a, w, p, k);

        let pivot = a[k * w + k];
        for j in 0..w {
            a[k * w + j] /= pivot;
        }

        for i in 0..n {
            if i == k {
                continue;
            }
            let facteur = a[i * w + k];
            if facteur == 0.0 {
                continue;
            }
            for j in 0..w {
                a[i * w + j] -= facteur * a[k * w + j];
            }
        }
    }

    let mut out = Vec::with_capacity(n * n);
    for i in 0..n {
        out.extend_from_slice(&a[i * w + n..(i + 1) * w]);
    }
    if out.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(Matrice::depuis_brut(Forme::new(n, n), out))
}

/* ------------------------ Rang (SVD Jacobi) ------------------------ */

fn norme2(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

fn scalaire(u: &[f64], v: &[f64]) -> f64 {
    u.iter().zip(v).map(|(a, b)| a * b).sum()
}

/// Valeurs singulières de A / max|a_ij| (ordre décroissant), plus ce facteur d’échelle.
///
/// Jacobi à un côté : on orthogonalise les colonnes deux à deux,
/// les σ sont alors les normes des colonnes. Après mise à l’échelle les
/// entrées sont dans [-1, 1] : les normes au carré ne débordent plus.
fn valeurs_singulieres_normees(m: &Matrice) -> (f64, Vec<f64>) {
    // On travaille sur la forme “haute” (plus de lignes que de colonnes).
    let source = if m.nb_lignes() >= m.nb_colonnes() {
        m.clone()
    } else {
        m.transposee()
    };
    let (lg, nc) = (source.nb_lignes(), source.nb_colonnes());
    let a = source.valeurs();

    let echelle = a.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if echelle == 0.0 {
        return (0.0, vec![0.0; nc]);
    }

    let mut cols: Vec<Vec<f64>> = (0..nc)
        .map(|j| (0..lg).map(|i| a[i * nc + j] / echelle).collect())
        .collect();

    for _ in 0..BALAYAGES_MAX {
        let mut rotation = false;

        for p in 0..nc {
            for q in (p + 1)..nc {
                let alpha = norme2(&cols[p]);
                let beta = norme2(&cols[q]);
                let gamma = scalaire(&cols[p], &cols[q]);

                if gamma == 0.0 || gamma.abs() <= f64::EPSILON * (alpha * beta).sqrt() {
                    continue;
                }
                rotation = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;

                let (gauche, droite) = cols.split_at_mut(q);
                for (xp, xq) in gauche[p].iter_mut().zip(droite[0].iter_mut()) {
                    let (up, uq) = (*xp, *xq);
                    *xp = c * up - s * uq;
                    *xq = s * up + c * uq;
                }
            }
        }

        if !rotation {
            break;
        }
    }

    let mut sv: Vec<f64> = cols.iter().map(|c| norme2(c).sqrt()).collect();
    sv.sort_by(|a, b| b.total_cmp(a));
    (echelle, sv)
}

/// Rang numérique : nombre de σ > σmax · max(m,n) · ε.
/// Critère relatif : testé directement sur les σ normés.
pub fn rang(m: &Matrice) -> usize {
    let (_, sv) = valeurs_singulieres_normees(m);
    let smax = sv.first().copied().unwrap_or(0.0);
    let dim = m.nb_lignes().max(m.nb_colonnes()) as f64;
    let tol = smax * dim * f64::EPSILON;
    sv.iter().filter(|&&s| s > tol).count()
}
