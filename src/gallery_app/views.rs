
use crate::gallery_app::aggregation::GalleryStatus;
use crate::gallery_app::export::{ExportFormat, Filter};
use crate::gallery_app::state::{GalleryAppState, ShapeKind};
use crate::gallery_app::theme;

pub fn render_top_bar(ctx: &egui::Context, state: &mut GalleryAppState) {
    let frame_style = egui::Frame::default()
        .fill(theme::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8));

    egui::TopBottomPanel::top("top_panel")
        .frame(frame_style)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    theme::TEXT_LIGHT,
                    egui::RichText::new("🎨 Sketchboard").size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);
                    let (color, label) = match state.gallery().status() {
                        GalleryStatus::Loading => (theme::STATUS_BUSY, "🔄 Loading"),
                        GalleryStatus::Saving => (theme::STATUS_BUSY, "💾 Saving"),
                        GalleryStatus::Online => (theme::STATUS_ONLINE, "🟢 Online"),
                        GalleryStatus::Offline => (theme::STATUS_OFFLINE, "🔴 Offline"),
                    };
                    ui.colored_label(color, label);
                    ui.add_space(16.0);
                    ui.colored_label(theme::TEXT_MUTED, state.config.server_url());
                });
            });
        });
}

/// Tag filter and image list
pub fn render_gallery_panel(ctx: &egui::Context, state: &mut GalleryAppState) {
    let frame = egui::Frame::default()
        .fill(theme::PANEL_BG)
        .inner_margin(egui::Margin::same(10));

    egui::SidePanel::left("gallery_panel")
        .frame(frame)
        .default_width(300.0)
        .show(ctx, |ui| {
            let gallery = state.gallery();

            ui.heading("Gallery");
            ui.horizontal(|ui| {
                let response = ui.text_edit_singleline(&mut state.tag_input);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (ui.button("Add tag").clicked() || submitted) && !state.tag_input.trim().is_empty() {
                    state.add_tag();
                }
            });

            let mut removed = None;
            ui.horizontal_wrapped(|ui| {
                for tag in state.controller.tags() {
                    let chip = egui::Button::new(format!("{} ✖", tag)).fill(theme::TAG_CHIP);
                    if ui.add(chip).clicked() {
                        removed = Some(tag.clone());
                    }
                }
            });
            if let Some(tag) = removed {
                state.remove_tag(&tag);
            }

            if !gallery.tags.is_empty() {
                ui.collapsing("Known tags", |ui| {
                    ui.horizontal_wrapped(|ui| {
                        for tag in &gallery.tags {
                            if ui.small_button(tag).clicked() {
                                state.tag_input = tag.clone();
                                state.add_tag();
                            }
                        }
                    });
                });
            }

            ui.horizontal(|ui| {
                if ui.button("Clear tags").clicked() {
                    state.clear_tags();
                }
                if ui.button("⟳ Refresh").clicked() {
                    state.refresh();
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 60.0)
                .show(ui, |ui| {
                    if gallery.images.is_empty() {
                        ui.colored_label(theme::TEXT_MUTED, "No images");
                    }
                    for record in &gallery.images {
                        let selected = state.controller.is_selected(&record.id);
                        let label = format!(
                            "{}\n{}  {}",
                            record.title,
                            record.date.format("%Y-%m-%d"),
                            record.tags.join(", ")
                        );
                        if ui.selectable_label(selected, label).clicked() {
                            state.controller.toggle_selection(&record.id);
                        }
                    }
                });

            ui.separator();
            let has_selection = !state.controller.selected_ids().is_empty();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(has_selection && !gallery.is_busy(), egui::Button::new("📂 Import"))
                    .clicked()
                {
                    state.import_selected();
                }
                let delete = egui::Button::new("🗑 Delete").fill(theme::BUTTON_DANGER);
                if ui.add_enabled(has_selection && !gallery.is_busy(), delete).clicked() {
                    state.delete_selected();
                }
                if ui.add_enabled(has_selection, egui::Button::new("Clear")).clicked() {
                    state.controller.clear_selection();
                }
            });
        });
}

/// Save, local cache and export controls
pub fn render_tools_panel(ctx: &egui::Context, state: &mut GalleryAppState) {
    let frame = egui::Frame::default()
        .fill(theme::PANEL_BG)
        .inner_margin(egui::Margin::same(10));

    egui::SidePanel::right("tools_panel")
        .frame(frame)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Board");
            ui.horizontal_wrapped(|ui| {
                for kind in ShapeKind::ALL {
                    if ui.button(kind.label()).clicked() {
                        state.add_shape(kind);
                    }
                }
            });
            ui.horizontal(|ui| {
                ui.label("Colour");
                ui.color_edit_button_srgb(&mut state.shape_color);
            });
            ui.horizontal(|ui| {
                if ui.add_enabled(state.board.can_undo(), egui::Button::new("↶ Undo")).clicked() {
                    state.board.undo();
                }
                if ui.add_enabled(state.board.can_redo(), egui::Button::new("↷ Redo")).clicked() {
                    state.board.redo();
                }
                if ui.button("Clear").clicked() {
                    state.board.clear_components();
                }
            });

            ui.collapsing("Canvas", |ui| {
                ui.horizontal(|ui| {
                    ui.add(egui::DragValue::new(&mut state.base_input.width).range(16..=4096));
                    ui.label("×");
                    ui.add(egui::DragValue::new(&mut state.base_input.height).range(16..=4096));
                });
                ui.horizontal(|ui| {
                    ui.label("Background");
                    ui.text_edit_singleline(&mut state.base_input.background_color);
                });
                if ui.button("Apply").clicked() {
                    state.apply_base_parameters();
                }
            });
            ui.separator();

            ui.heading("Save");
            ui.label("Title");
            ui.text_edit_singleline(&mut state.title_input);
            ui.label("Tags (comma separated)");
            ui.text_edit_singleline(&mut state.save_tags_input);
            ui.horizontal(|ui| {
                let save = egui::Button::new("💾 Save").fill(theme::BUTTON_PRIMARY);
                if ui.add_enabled(!state.title_input.trim().is_empty(), save).clicked() {
                    state.save_board(false);
                }
                if state.loaded_id.is_some() && ui.button("Save as new").clicked() {
                    state.save_board(true);
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Save locally").clicked() {
                    state.save_local();
                }
                if ui.button("Restore local").clicked() {
                    state.load_local();
                }
            });
            ui.separator();

            ui.heading("Export");
            ui.text_edit_singleline(&mut state.export_filename);
            egui::ComboBox::from_label("Format")
                .selected_text(state.export_format.label())
                .show_ui(ui, |ui| {
                    for format in ExportFormat::ALL {
                        ui.selectable_value(&mut state.export_format, format, format.label());
                    }
                });
            egui::ComboBox::from_label("Filter")
                .selected_text(state.export_filter.label())
                .show_ui(ui, |ui| {
                    for filter in Filter::ALL {
                        ui.selectable_value(&mut state.export_filter, filter, filter.label());
                    }
                });
            ui.checkbox(&mut state.send_by_email, "Send by e-mail");
            if state.send_by_email {
                ui.text_edit_singleline(&mut state.email_input);
            }
            if ui.button("⬇ Export").clicked() {
                state.export();
            }

            if let Some(status) = &state.status_line {
                ui.separator();
                ui.colored_label(theme::TEXT_MUTED, status);
            }
        });
}

pub fn render_board(ctx: &egui::Context, state: &mut GalleryAppState) {
    let frame = egui::Frame::default()
        .fill(theme::BOARD_BG)
        .inner_margin(egui::Margin::same(16));

    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        ui.vertical_centered(|ui| match state.preview_texture(ctx) {
            Some(texture) => {
                ui.add(egui::Image::new(texture).shrink_to_fit());
            }
            None => {
                ui.colored_label(theme::TEXT_MUTED, "Preview unavailable");
            }
        });
    });
}

/// Fixed-width error dialogs, one per reported failure
pub fn render_error_windows(ctx: &egui::Context, state: &mut GalleryAppState) {
    let mut dismissed = None;
    for (index, dialog) in state.open_errors.iter().enumerate() {
        egui::Window::new("Error")
            .id(egui::Id::new(("error_dialog", index)))
            .collapsible(false)
            .resizable(false)
            .min_width(dialog.width)
            .max_width(dialog.width)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, index as f32 * 24.0))
            .show(ctx, |ui| {
                ui.label(&dialog.message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = Some(index);
                }
            });
    }
    if let Some(index) = dismissed {
        state.dismiss_error(index);
    }
}
