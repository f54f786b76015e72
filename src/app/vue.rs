// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Deux sections indépendantes : Matrices / Trigonométrie
// - Chaque bouton = un cycle lecture -> calcul -> affichage (ou message d’erreur)
// - Aucune erreur ne “casse” la session : on corrige et on relance

use eframe::egui;

use super::etat::{AppCalc, OngletMatrices, OngletTrig, Sortie};
use crate::noyau::{
    calculer, evaluer_expression, evaluer_expression_detaillee, evaluer_trig, format_flottant,
    FonctionTrig, OperationMatrice, Resultat, Unite,
};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Calculatrice matrices & trigo");
                    if ui
                        .button("AC")
                        .on_hover_text("Remise à zéro totale")
                        .clicked()
                    {
                        self.reset_total();
                    }
                });
                ui.add_space(6.0);

                ui.strong("Matrices");
                self.ui_matrices(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.strong("Trigonométrie");
                self.ui_trig(ui);
            });
    }

    /* ------------------------ Matrices ------------------------ */

    fn ui_matrices(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut self.onglet_matrices,
                OngletMatrices::Operations,
                "Opérations A/B",
            );
            ui.selectable_value(
                &mut self.onglet_matrices,
                OngletMatrices::DeterminantInverse,
                "Déterminant & inverse",
            );
        });
        ui.add_space(4.0);

        match self.onglet_matrices {
            OngletMatrices::Operations => self.ui_operations(ui),
            OngletMatrices::DeterminantInverse => self.ui_det_inverse(ui),
        }
    }

    fn ui_operations(&mut self, ui: &mut egui::Ui) {
        ui.weak("Lignes séparées par retour à la ligne, nombres par espaces ou virgules.");

        ui.columns(2, |cols| {
            cols[0].label("Matrice A :");
            Self::zone_matrice(&mut cols[0], "texte_a", &mut self.texte_a);
            cols[1].label("Matrice B :");
            Self::zone_matrice(&mut cols[1], "texte_b", &mut self.texte_b);
        });

        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("operation_matrice")
                .selected_text(self.operation.libelle())
                .show_ui(ui, |ui| {
                    for op in OperationMatrice::TOUTES {
                        ui.selectable_value(&mut self.operation, op, op.libelle());
                    }
                });

            if ui.button("Calculer").clicked() {
                self.calculer_operation();
            }
        });

        Self::ui_sortie(ui, "sortie_operation", &self.sortie_operation);
    }

    fn ui_det_inverse(&mut self, ui: &mut egui::Ui) {
        ui.label("Matrice (carrée) :");
        Self::zone_matrice(ui, "texte_m", &mut self.texte_m);

        if ui.button("Déterminant & inverse").clicked() {
            self.calculer_det_inverse();
        }

        Self::ui_sortie(ui, "sortie_det", &self.sortie_det);
    }

    fn zone_matrice(ui: &mut egui::Ui, id: &str, texte: &mut String) {
        ui.add(
            egui::TextEdit::multiline(texte)
                .id_salt(id)
                .desired_rows(5)
                .desired_width(f32::INFINITY)
                .code_editor(),
        );
    }

    /* ------------------------ Trigonométrie ------------------------ */

    fn ui_trig(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.onglet_trig, OngletTrig::Fonction, "Fonction");
            ui.selectable_value(&mut self.onglet_trig, OngletTrig::Expression, "Expression");
        });
        ui.add_space(4.0);

        match self.onglet_trig {
            OngletTrig::Fonction => self.ui_trig_fonction(ui),
            OngletTrig::Expression => self.ui_trig_expression(ui),
        }
    }

    fn ui_trig_fonction(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("fonction_trig")
                .selected_text(self.fonction.nom())
                .show_ui(ui, |ui| {
                    for f in FonctionTrig::TOUTES {
                        ui.selectable_value(&mut self.fonction, f, f.nom());
                    }
                });

            egui::ComboBox::from_id_salt("unite_angle")
                .selected_text(self.unite.libelle())
                .show_ui(ui, |ui| {
                    for u in Unite::TOUTES {
                        ui.selectable_value(&mut self.unite, u, u.libelle());
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Angle :");
            let resp = ui.add(
                egui::TextEdit::singleline(&mut self.angle)
                    .id_salt("angle_edit")
                    .desired_width(120.0),
            );
            let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Calculer").clicked() || enter {
                self.calculer_trig();
            }
        });

        Self::ui_sortie(ui, "sortie_trig", &self.sortie_trig);
    }

    fn ui_trig_expression(&mut self, ui: &mut egui::Ui) {
        ui.label("Expression :");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.expression)
                .id_salt("expression_edit")
                .desired_width(ui.available_width())
                .hint_text("Ex: sin(pi/6) + cos(pi/3), sqrt(2)/2, exp(1) ** 2")
                .code_editor(),
        );

        // Enter évalue (seulement si le champ avait le focus)
        let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        ui.horizontal(|ui| {
            if ui.button("Évaluer").clicked() || enter {
                self.lancer_expression();
            }
            if ui
                .button("Démarche")
                .on_hover_text("Évaluer et afficher jetons, RPN et arbre")
                .clicked()
            {
                self.lancer_expression_avec_demarche();
            }
        });

        Self::ui_sortie(ui, "sortie_expression", &self.sortie_expression);

        if !self.demarche.jetons.is_empty() {
            egui::CollapsingHeader::new("Démarche")
                .default_open(true)
                .show(ui, |ui| {
                    Self::champ_monospace(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                    Self::champ_monospace(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                    Self::champ_monospace(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
                });
        }
    }

    /* ------------------------ Affichage des sorties ------------------------ */

    fn ui_sortie(ui: &mut egui::Ui, id: &str, sortie: &Sortie) {
        if sortie.est_vide() {
            return;
        }
        ui.push_id(id, |ui| {
            for (titre, texte) in &sortie.blocs {
                Self::champ_monospace(ui, titre, titre, texte);
            }
            if !sortie.avis.is_empty() {
                ui.colored_label(ui.visuals().warn_fg_color, &sortie.avis);
            }
            if !sortie.erreur.is_empty() {
                ui.colored_label(ui.visuals().error_fg_color, &sortie.erreur);
            }
        });
    }

    fn champ_monospace(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }

    /* ------------------------ Appels au noyau ------------------------ */

    fn blocs_de(&self, res: &Resultat) -> Vec<(String, String)> {
        res.blocs(&self.reglages)
            .into_iter()
            .map(|b| (b.titre, b.texte))
            .collect()
    }

    fn calculer_operation(&mut self) {
        match calculer(self.operation, &self.texte_a, &self.texte_b, &self.reglages) {
            Ok(res) => {
                let blocs = self.blocs_de(&res);
                let avis = res.avis().map(|a| a.to_string());
                self.sortie_operation.set_resultat(blocs, avis);
            }
            Err(e) => self.sortie_operation.set_erreur(format!("Erreur : {e}")),
        }
    }

    fn calculer_det_inverse(&mut self) {
        match calculer(OperationMatrice::Inverse, &self.texte_m, "", &self.reglages) {
            Ok(res) => {
                let blocs = self.blocs_de(&res);
                let avis = res.avis().map(|a| a.to_string());
                self.sortie_det.set_resultat(blocs, avis);
            }
            Err(e) => self.sortie_det.set_erreur(format!("Erreur : {e}")),
        }
    }

    fn calculer_trig(&mut self) {
        match evaluer_trig(self.fonction, &self.angle, self.unite) {
            Ok(y) => self
                .sortie_trig
                .set_resultat(vec![(self.fonction.nom().to_string(), format_flottant(y))], None),
            Err(e) => self.sortie_trig.set_erreur(format!("Erreur : {e}")),
        }
    }

    fn afficher_valeur_expression(&mut self, v: f64) {
        self.sortie_expression.set_resultat(
            vec![("Résultat de l’expression".to_string(), format_flottant(v))],
            None,
        );
    }

    fn lancer_expression(&mut self) {
        match evaluer_expression(&self.expression) {
            Ok(v) => {
                self.afficher_valeur_expression(v);
                self.demarche = Default::default();
            }
            Err(e) => self.set_erreur_expression(format!("Erreur : {e}")),
        }
    }

    fn lancer_expression_avec_demarche(&mut self) {
        match evaluer_expression_detaillee(&self.expression, &self.reglages) {
            Ok((v, d)) => {
                self.afficher_valeur_expression(v);
                self.demarche = d;
            }
            Err(e) => self.set_erreur_expression(format!("Erreur : {e}")),
        }
    }
}
