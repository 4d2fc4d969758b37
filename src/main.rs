// Copyright (C) 2025 Arjun Guha
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk::glib::Propagation;
use gtk::prelude::*;
use gtk::{
    Application, ApplicationWindow, Box as GtkBox, Button, CellRendererText, CheckButton,
    Clipboard, CssProvider, Entry, Label, MessageDialog, Notebook, Orientation, Paned, Revealer,
    RevealerTransitionType, ScrolledWindow, SpinButton, Statusbar, TextView, TreeIter, TreePath,
    TreeStore, TreeView, TreeViewColumn,
};

use tidyjson::{
    replace_all, replace_current, ActionError, Match, PaneBuffer, SearchOptions, SearchState,
    Session, SettingsStore, TreeNode, MAX_FONT_SIZE, MIN_FONT_SIZE,
};

const HIGHLIGHT_TAG: &str = "search-match";

fn main() {
    tracing_subscriber::fmt().init();

    let app = Application::builder()
        .application_id("com.example.tidyjson")
        .build();

    app.connect_activate(build_ui);
    app.run_with_args(&[] as &[&str]);
}

fn build_ui(app: &Application) {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("JSON Formatter")
        .default_width(1200)
        .default_height(800)
        .build();

    let session = Rc::new(RefCell::new(Session::new()));
    let settings = Rc::new(RefCell::new(SettingsStore::load()));

    // Text panes
    let input_view = TextView::new();
    input_view.set_monospace(true);
    let output_view = TextView::new();
    output_view.set_editable(false);
    output_view.set_monospace(true);
    for view in [&input_view, &output_view] {
        let buffer = view.buffer().expect("text view has a buffer");
        buffer.create_tag(
            Some(HIGHLIGHT_TAG),
            &[
                ("background", &"#3498db"),
                ("foreground", &"#ffffff"),
                ("weight", &700i32),
            ],
        );
    }

    // Tree pane: Key / Value / Type columns
    let tree_store = TreeStore::new(&[glib::Type::STRING, glib::Type::STRING, glib::Type::STRING]);
    let tree_view = TreeView::with_model(&tree_store);
    for (idx, title) in ["Key", "Value", "Type"].iter().enumerate() {
        let column = TreeViewColumn::new();
        let cell = CellRendererText::new();
        TreeViewColumnExt::pack_start(&column, &cell, true);
        column.set_title(title);
        TreeViewColumnExt::add_attribute(&column, &cell, "text", idx as i32);
        tree_view.append_column(&column);
    }
    tree_view.set_headers_visible(true);

    let statusbar = Statusbar::new();

    // Search/replace bars, one per pane; replace only on the writable pane
    let input_bar = build_search_bar(&input_view, &window, &statusbar, true);
    let output_bar = build_search_bar(&output_view, &window, &statusbar, false);

    // Header bar actions
    let header_bar = gtk::HeaderBar::new();
    header_bar.set_show_close_button(true);
    header_bar.set_title(Some("JSON Formatter"));

    let beautify_button = action_button("Beautify", "Format JSON with 4-space indentation");
    let sort_button = action_button("Sort", "Format JSON with keys sorted at every level");
    let minify_button = action_button("Minify", "Compress JSON to a single line");
    let validate_button = action_button("Validate", "Check JSON syntax");
    let copy_button = action_button("Copy", "Copy the output text to the clipboard");
    let clear_button = action_button("Clear", "Clear both panes and the tree");

    header_bar.pack_start(&beautify_button);
    header_bar.pack_start(&sort_button);
    header_bar.pack_start(&minify_button);
    header_bar.pack_start(&validate_button);
    header_bar.pack_end(&clear_button);
    header_bar.pack_end(&copy_button);
    window.set_titlebar(Some(&header_bar));

    // Left pane: input
    let input_label = Label::new(Some("Input"));
    input_label.set_halign(gtk::Align::Start);
    let input_scroll = ScrolledWindow::new(None::<&gtk::Adjustment>, None::<&gtk::Adjustment>);
    input_scroll.set_policy(gtk::PolicyType::Automatic, gtk::PolicyType::Automatic);
    input_scroll.add(&input_view);

    let left_box = GtkBox::new(Orientation::Vertical, 4);
    left_box.pack_start(&input_label, false, false, 0);
    left_box.pack_start(&input_bar.revealer, false, false, 0);
    left_box.pack_start(&input_scroll, true, true, 0);

    // Right pane: output notebook
    let output_scroll = ScrolledWindow::new(None::<&gtk::Adjustment>, None::<&gtk::Adjustment>);
    output_scroll.set_policy(gtk::PolicyType::Automatic, gtk::PolicyType::Automatic);
    output_scroll.add(&output_view);
    let output_page = GtkBox::new(Orientation::Vertical, 4);
    output_page.pack_start(&output_bar.revealer, false, false, 0);
    output_page.pack_start(&output_scroll, true, true, 0);

    let tree_scroll = ScrolledWindow::new(None::<&gtk::Adjustment>, None::<&gtk::Adjustment>);
    tree_scroll.set_policy(gtk::PolicyType::Automatic, gtk::PolicyType::Automatic);
    tree_scroll.add(&tree_view);
    let expand_button = action_button("Expand All", "Expand every tree node");
    let collapse_button = action_button("Collapse All", "Collapse every node except the root");
    let tree_toolbar = GtkBox::new(Orientation::Horizontal, 4);
    tree_toolbar.pack_start(&expand_button, false, false, 0);
    tree_toolbar.pack_start(&collapse_button, false, false, 0);
    let tree_page = GtkBox::new(Orientation::Vertical, 4);
    tree_page.pack_start(&tree_toolbar, false, false, 0);
    tree_page.pack_start(&tree_scroll, true, true, 0);

    // Font CSS providers, shared by the options page and scroll handlers
    let text_css = CssProvider::new();
    let ui_css = CssProvider::new();
    for view in [&input_view, &output_view] {
        view.style_context()
            .add_provider(&text_css, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION);
    }
    input_label
        .style_context()
        .add_provider(&ui_css, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION);
    apply_text_font(&text_css, settings.borrow().font().text_font_size);
    apply_ui_font(&ui_css, settings.borrow().font().ui_font_size);

    let (options_page, text_spin) = build_options_page(&settings, &text_css, &ui_css, &statusbar);

    let notebook = Notebook::new();
    notebook.append_page(&output_page, Some(&Label::new(Some("Formatted Text"))));
    notebook.append_page(&tree_page, Some(&Label::new(Some("Tree View"))));
    notebook.append_page(&options_page, Some(&Label::new(Some("Options"))));

    let paned = Paned::new(Orientation::Horizontal);
    paned.add1(&left_box);
    paned.add2(&notebook);
    paned.set_position(600);

    let root_box = GtkBox::new(Orientation::Vertical, 0);
    root_box.pack_start(&paned, true, true, 0);
    root_box.pack_start(&statusbar, false, false, 0);
    window.add(&root_box);

    // Formatting actions
    {
        let session = session.clone();
        let window = window.clone();
        let statusbar = statusbar.clone();
        let input_view = input_view.clone();
        let output_view = output_view.clone();
        let tree_store = tree_store.clone();
        let tree_view = tree_view.clone();
        beautify_button.connect_clicked(move |_| {
            run_format_action(
                &session,
                &window,
                &statusbar,
                &input_view,
                &output_view,
                Some((&tree_store, &tree_view)),
                |s| s.beautify(),
            );
        });
    }
    {
        let session = session.clone();
        let window = window.clone();
        let statusbar = statusbar.clone();
        let input_view = input_view.clone();
        let output_view = output_view.clone();
        let tree_store = tree_store.clone();
        let tree_view = tree_view.clone();
        sort_button.connect_clicked(move |_| {
            run_format_action(
                &session,
                &window,
                &statusbar,
                &input_view,
                &output_view,
                Some((&tree_store, &tree_view)),
                |s| s.sort(),
            );
        });
    }
    {
        let session = session.clone();
        let window = window.clone();
        let statusbar = statusbar.clone();
        let input_view = input_view.clone();
        let output_view = output_view.clone();
        minify_button.connect_clicked(move |_| {
            run_format_action(
                &session,
                &window,
                &statusbar,
                &input_view,
                &output_view,
                None,
                |s| s.minify(),
            );
        });
    }
    {
        let session = session.clone();
        let window = window.clone();
        let statusbar = statusbar.clone();
        let input_view = input_view.clone();
        validate_button.connect_clicked(move |_| {
            let text = buffer_text(&input_view);
            let result = {
                let mut s = session.borrow_mut();
                s.set_input(&text);
                s.validate()
            };
            match result {
                Ok(msg) => {
                    show_message(&window, gtk::MessageType::Info, msg);
                    push_status(&statusbar, msg);
                }
                Err(err) => present_error(&window, &statusbar, &err),
            }
        });
    }
    {
        let session = session.clone();
        let window = window.clone();
        let statusbar = statusbar.clone();
        copy_button.connect_clicked(move |_| {
            let result = session.borrow().copy_output().map(|text| text.to_string());
            match result {
                Ok(text) => {
                    let clipboard = Clipboard::get(&gtk::gdk::SELECTION_CLIPBOARD);
                    clipboard.set_text(&text);
                    push_status(&statusbar, "Output copied to clipboard");
                }
                Err(err) => present_error(&window, &statusbar, &err),
            }
        });
    }
    {
        let session = session.clone();
        let window = window.clone();
        let statusbar = statusbar.clone();
        let input_view = input_view.clone();
        let output_view = output_view.clone();
        let tree_store = tree_store.clone();
        clear_button.connect_clicked(move |_| {
            if !confirm(&window, "Clear all content?") {
                return;
            }
            let msg = session.borrow_mut().clear();
            set_view_text(&input_view, "");
            set_view_text(&output_view, "");
            tree_store.clear();
            push_status(&statusbar, msg);
        });
    }

    // Tree presentation actions (view state only; the tree data is untouched)
    {
        let tree_view = tree_view.clone();
        let statusbar = statusbar.clone();
        expand_button.connect_clicked(move |_| {
            tree_view.expand_all();
            push_status(&statusbar, "All nodes expanded");
        });
    }
    {
        let tree_view = tree_view.clone();
        let statusbar = statusbar.clone();
        collapse_button.connect_clicked(move |_| {
            tree_view.collapse_all();
            tree_view.expand_row(&TreePath::new_first(), false);
            push_status(&statusbar, "All nodes collapsed");
        });
    }

    // Ctrl+F opens search on the focused pane; Ctrl+R opens replace on
    // the input pane, the only writable one.
    {
        let input_bar = input_bar.clone();
        let output_bar = output_bar.clone();
        let output_view = output_view.clone();
        window.connect_key_press_event(move |_, event| {
            if !event
                .state()
                .contains(gtk::gdk::ModifierType::CONTROL_MASK)
            {
                return Propagation::Proceed;
            }
            if let Some(key_name) = event.keyval().name() {
                match key_name.as_str() {
                    "f" | "F" => {
                        if output_view.has_focus() {
                            output_bar.open(false);
                        } else {
                            input_bar.open(false);
                        }
                        return Propagation::Stop;
                    }
                    "r" | "R" => {
                        input_bar.open(true);
                        return Propagation::Stop;
                    }
                    _ => {}
                }
            }
            Propagation::Proceed
        });
    }

    // Ctrl+scroll steps the text font size
    for view in [&input_view, &output_view] {
        let settings = settings.clone();
        let text_spin = text_spin.clone();
        view.add_events(gtk::gdk::EventMask::SCROLL_MASK | gtk::gdk::EventMask::SMOOTH_SCROLL_MASK);
        view.connect_scroll_event(move |_, event| {
            if !event
                .state()
                .contains(gtk::gdk::ModifierType::CONTROL_MASK)
            {
                return Propagation::Proceed;
            }
            let step = match event.direction() {
                gtk::gdk::ScrollDirection::Up => 1,
                gtk::gdk::ScrollDirection::Down => -1,
                gtk::gdk::ScrollDirection::Smooth => {
                    let (_dx, dy) = event.delta();
                    if dy < 0.0 {
                        1
                    } else if dy > 0.0 {
                        -1
                    } else {
                        0
                    }
                }
                _ => 0,
            };
            if step != 0 {
                let size = {
                    let mut s = settings.borrow_mut();
                    s.adjust_text_font_size(step);
                    s.font().text_font_size
                };
                // The spin button's value-changed handler re-applies the CSS.
                text_spin.set_value(size as f64);
            }
            Propagation::Stop
        });
    }

    window.show_all();
}

fn action_button(label: &str, tooltip: &str) -> Button {
    Button::builder().label(label).tooltip_text(tooltip).build()
}

/// Pulls the input pane into the session, runs one formatting action, and
/// presents the outcome. `tree` is `Some` for actions that rebuild the tree.
fn run_format_action<F>(
    session: &Rc<RefCell<Session>>,
    window: &ApplicationWindow,
    statusbar: &Statusbar,
    input_view: &TextView,
    output_view: &TextView,
    tree: Option<(&TreeStore, &TreeView)>,
    action: F,
) where
    F: FnOnce(&mut Session) -> Result<&'static str, ActionError>,
{
    let text = buffer_text(input_view);
    let outcome = {
        let mut s = session.borrow_mut();
        s.set_input(&text);
        action(&mut s).map(|msg| (msg, s.output().text().to_string()))
    };
    match outcome {
        Ok((msg, output)) => {
            set_view_text(output_view, &output);
            if let Some((store, view)) = tree {
                refresh_tree(store, view, session.borrow().tree());
            }
            push_status(statusbar, msg);
        }
        Err(err) => present_error(window, statusbar, &err),
    }
}

fn refresh_tree(store: &TreeStore, view: &TreeView, root: Option<&TreeNode>) {
    store.clear();
    if let Some(root) = root {
        populate_tree_store(store, None, root);
        view.expand_row(&TreePath::new_first(), false);
    }
}

/// Recursively populates the tree store from the display tree.
fn populate_tree_store(store: &TreeStore, parent: Option<&TreeIter>, node: &TreeNode) {
    let iter = store.append(parent);
    store.set_value(&iter, 0, &node.label.to_value());
    store.set_value(&iter, 1, &node.preview.to_value());
    store.set_value(&iter, 2, &node.kind.label().to_value());
    for child in &node.children {
        populate_tree_store(store, Some(&iter), child);
    }
}

/// Embedded search (and optionally replace) bar bound to one text pane.
#[derive(Clone)]
struct SearchBar {
    revealer: Revealer,
    query_entry: Entry,
    replace_row: Option<GtkBox>,
}

impl SearchBar {
    fn open(&self, with_replace: bool) {
        if let Some(row) = &self.replace_row {
            row.set_visible(with_replace);
        }
        self.revealer.set_reveal_child(true);
        self.query_entry.grab_focus();
    }
}

fn build_search_bar(
    view: &TextView,
    window: &ApplicationWindow,
    statusbar: &Statusbar,
    with_replace: bool,
) -> SearchBar {
    let state = Rc::new(RefCell::new(SearchState::default()));
    // Set while this bar rewrites its own pane, so the buffer-changed
    // handler does not drop the selection the engine just computed.
    let self_edit = Rc::new(Cell::new(false));

    let container = GtkBox::new(Orientation::Vertical, 2);

    let query_entry = Entry::new();
    query_entry.set_placeholder_text(Some("Search..."));
    query_entry.set_hexpand(true);
    let case_toggle = CheckButton::with_label("Aa");
    case_toggle.set_tooltip_text(Some("Match case"));
    let word_toggle = CheckButton::with_label("W");
    word_toggle.set_tooltip_text(Some("Whole words"));
    let prev_button = action_button("↑", "Find previous");
    let next_button = action_button("↓", "Find next");
    let close_button = action_button("×", "Close search");

    let search_row = GtkBox::new(Orientation::Horizontal, 4);
    search_row.pack_start(&query_entry, true, true, 0);
    search_row.pack_start(&case_toggle, false, false, 0);
    search_row.pack_start(&word_toggle, false, false, 0);
    search_row.pack_start(&prev_button, false, false, 0);
    search_row.pack_start(&next_button, false, false, 0);
    search_row.pack_start(&close_button, false, false, 0);
    container.pack_start(&search_row, false, false, 0);

    let mut replace_row = None;
    if with_replace {
        let replace_entry = Entry::new();
        replace_entry.set_placeholder_text(Some("Replace with..."));
        replace_entry.set_hexpand(true);
        let replace_button = action_button("Replace", "Replace the current match");
        let replace_all_button = action_button("All", "Replace every match");

        let row = GtkBox::new(Orientation::Horizontal, 4);
        row.set_no_show_all(true);
        row.pack_start(&replace_entry, true, true, 0);
        row.pack_start(&replace_button, false, false, 0);
        row.pack_start(&replace_all_button, false, false, 0);
        replace_entry.show();
        replace_button.show();
        replace_all_button.show();
        container.pack_start(&row, false, false, 0);

        // Replace current: two-step, the first press after opening finds
        {
            let state = state.clone();
            let self_edit = self_edit.clone();
            let view = view.clone();
            let statusbar = statusbar.clone();
            let query_entry = query_entry.clone();
            let replace_entry = replace_entry.clone();
            let case_toggle = case_toggle.clone();
            let word_toggle = word_toggle.clone();
            replace_button.connect_clicked(move |_| {
                let text = buffer_text(&view);
                let replacement = replace_entry.text();
                let mut pane = PaneBuffer::with_text(&text, false);
                let (count, selection) = {
                    let mut st = state.borrow_mut();
                    st.set_query(&query_entry.text());
                    st.options = SearchOptions {
                        case_sensitive: case_toggle.is_active(),
                        whole_word: word_toggle.is_active(),
                    };
                    if st.query().is_empty() {
                        return;
                    }
                    let count = replace_current(&mut pane, &mut st, &replacement);
                    (count, st.selection())
                };
                if count == 1 {
                    self_edit.set(true);
                    set_view_text(&view, pane.text());
                    self_edit.set(false);
                    push_status(&statusbar, "Replaced 1 occurrence");
                }
                match selection {
                    Some(hit) => highlight_match(&view, pane.text(), hit),
                    None => {
                        clear_highlight(&view);
                        if count == 0 {
                            push_status(&statusbar, "No match to replace");
                        }
                    }
                }
            });
        }

        // Replace all: confirmed, single pass, reports the count
        {
            let state = state.clone();
            let self_edit = self_edit.clone();
            let view = view.clone();
            let window = window.clone();
            let statusbar = statusbar.clone();
            let query_entry = query_entry.clone();
            let replace_entry = replace_entry.clone();
            let case_toggle = case_toggle.clone();
            let word_toggle = word_toggle.clone();
            replace_all_button.connect_clicked(move |_| {
                let query = query_entry.text();
                if query.is_empty() {
                    return;
                }
                let replacement = replace_entry.text();
                let prompt = format!("Replace every '{}' with '{}'?", query, replacement);
                if !confirm(&window, &prompt) {
                    return;
                }
                let mut pane = PaneBuffer::with_text(&buffer_text(&view), false);
                let options = SearchOptions {
                    case_sensitive: case_toggle.is_active(),
                    whole_word: word_toggle.is_active(),
                };
                let count = replace_all(&mut pane, &query, &replacement, options);
                if count > 0 {
                    self_edit.set(true);
                    set_view_text(&view, pane.text());
                    self_edit.set(false);
                    clear_highlight(&view);
                    state.borrow_mut().resume_at(0);
                }
                push_status(&statusbar, &format!("Replaced {} occurrence(s)", count));
            });
        }

        replace_row = Some(row);
    }

    // A stale selection span must not survive an edit; the highlight
    // goes with it.
    {
        let state = state.clone();
        let self_edit = self_edit.clone();
        let buffer = view.buffer().expect("text view has a buffer");
        buffer.connect_changed(move |buf| {
            if self_edit.get() {
                return;
            }
            state.borrow_mut().invalidate();
            buf.remove_tag_by_name(HIGHLIGHT_TAG, &buf.start_iter(), &buf.end_iter());
        });
    }

    // Query edits reset the search cursor to the buffer start
    {
        let state = state.clone();
        query_entry.connect_changed(move |entry| {
            state.borrow_mut().set_query(&entry.text());
        });
    }

    let do_find: Rc<dyn Fn(bool)> = {
        let state = state.clone();
        let view = view.clone();
        let statusbar = statusbar.clone();
        let query_entry = query_entry.clone();
        let case_toggle = case_toggle.clone();
        let word_toggle = word_toggle.clone();
        Rc::new(move |forward: bool| {
            let text = buffer_text(&view);
            let hit = {
                let mut st = state.borrow_mut();
                st.set_query(&query_entry.text());
                st.options = SearchOptions {
                    case_sensitive: case_toggle.is_active(),
                    whole_word: word_toggle.is_active(),
                };
                if st.query().is_empty() {
                    return;
                }
                if forward {
                    st.find_next(&text)
                } else {
                    st.find_previous(&text)
                }
            };
            match hit {
                Some(m) => {
                    highlight_match(&view, &text, m);
                    push_status(&statusbar, "Match found");
                }
                None => {
                    clear_highlight(&view);
                    push_status(&statusbar, &format!("'{}' not found", query_entry.text()));
                }
            }
        })
    };

    {
        let do_find = do_find.clone();
        next_button.connect_clicked(move |_| do_find(true));
    }
    {
        let do_find = do_find.clone();
        prev_button.connect_clicked(move |_| do_find(false));
    }
    {
        // Return in the query entry triggers find-next
        let do_find = do_find.clone();
        query_entry.connect_activate(move |_| do_find(true));
    }

    let revealer = Revealer::new();
    revealer.set_transition_type(RevealerTransitionType::SlideDown);
    revealer.add(&container);

    {
        let revealer = revealer.clone();
        let view = view.clone();
        close_button.connect_clicked(move |_| {
            revealer.set_reveal_child(false);
            clear_highlight(&view);
            view.grab_focus();
        });
    }

    SearchBar {
        revealer,
        query_entry,
        replace_row,
    }
}

fn build_options_page(
    settings: &Rc<RefCell<SettingsStore>>,
    text_css: &CssProvider,
    ui_css: &CssProvider,
    statusbar: &Statusbar,
) -> (GtkBox, SpinButton) {
    let page = GtkBox::new(Orientation::Vertical, 8);
    page.set_margin_top(16);
    page.set_margin_bottom(16);
    page.set_margin_start(16);
    page.set_margin_end(16);

    let font = settings.borrow().font();

    let text_spin = SpinButton::with_range(MIN_FONT_SIZE as f64, MAX_FONT_SIZE as f64, 1.0);
    text_spin.set_value(font.text_font_size as f64);
    let text_row = GtkBox::new(Orientation::Horizontal, 8);
    text_row.pack_start(&Label::new(Some("Editor font size:")), false, false, 0);
    text_row.pack_start(&text_spin, false, false, 0);

    let ui_spin = SpinButton::with_range(MIN_FONT_SIZE as f64, MAX_FONT_SIZE as f64, 1.0);
    ui_spin.set_value(font.ui_font_size as f64);
    let ui_row = GtkBox::new(Orientation::Horizontal, 8);
    ui_row.pack_start(&Label::new(Some("Label font size:")), false, false, 0);
    ui_row.pack_start(&ui_spin, false, false, 0);

    let save_button = action_button("Save Font Settings", "Apply and persist the label font size");

    let hint = Label::new(Some(
        "Ctrl + mouse wheel over a text pane adjusts the editor font.\n\
         The label font size takes effect after saving.",
    ));
    hint.set_halign(gtk::Align::Start);

    page.pack_start(&text_row, false, false, 0);
    page.pack_start(&ui_row, false, false, 0);
    page.pack_start(&save_button, false, false, 0);
    page.pack_start(&hint, false, false, 0);

    // Editor size applies (and persists) immediately
    {
        let settings = settings.clone();
        let text_css = text_css.clone();
        let statusbar = statusbar.clone();
        text_spin.connect_value_changed(move |spin| {
            let size = spin.value_as_int();
            settings.borrow_mut().set_text_font_size(size);
            apply_text_font(&text_css, size);
            push_status(&statusbar, &format!("Editor font size set to {}px", size));
        });
    }

    // Label size is staged; it applies and persists on save
    {
        let settings = settings.clone();
        let statusbar = statusbar.clone();
        ui_spin.connect_value_changed(move |spin| {
            let size = spin.value_as_int();
            settings.borrow_mut().stage_ui_font_size(size);
            push_status(
                &statusbar,
                &format!("Label font size set to {}px (save to apply)", size),
            );
        });
    }
    {
        let settings = settings.clone();
        let ui_css = ui_css.clone();
        let statusbar = statusbar.clone();
        save_button.connect_clicked(move |_| {
            let size = {
                let mut s = settings.borrow_mut();
                s.commit();
                s.font().ui_font_size
            };
            apply_ui_font(&ui_css, size);
            push_status(&statusbar, "Font settings saved");
        });
    }

    (page, text_spin)
}

fn apply_text_font(provider: &CssProvider, size: i32) {
    let css = format!(
        "textview {{ font-family: monospace; font-size: {}px; }}",
        size
    );
    if let Err(e) = provider.load_from_data(css.as_bytes()) {
        tracing::warn!("failed to apply text font css: {}", e);
    }
}

fn apply_ui_font(provider: &CssProvider, size: i32) {
    let css = format!("label {{ font-size: {}px; }}", size);
    if let Err(e) = provider.load_from_data(css.as_bytes()) {
        tracing::warn!("failed to apply label font css: {}", e);
    }
}

fn buffer_text(view: &TextView) -> String {
    let buffer = view.buffer().expect("text view has a buffer");
    buffer
        .text(&buffer.start_iter(), &buffer.end_iter(), false)
        .map(|t| t.to_string())
        .unwrap_or_default()
}

fn set_view_text(view: &TextView, text: &str) {
    if let Some(buffer) = view.buffer() {
        buffer.set_text(text);
    }
}

fn clear_highlight(view: &TextView) {
    if let Some(buffer) = view.buffer() {
        buffer.remove_tag_by_name(HIGHLIGHT_TAG, &buffer.start_iter(), &buffer.end_iter());
    }
}

/// Paints the ephemeral highlight over one match. Byte offsets from the
/// search engine are converted to the character offsets GTK buffers use.
fn highlight_match(view: &TextView, text: &str, hit: Match) {
    let Some(buffer) = view.buffer() else {
        return;
    };
    clear_highlight(view);
    let start_chars = text[..hit.start].chars().count() as i32;
    let end_chars = start_chars + text[hit.start..hit.end].chars().count() as i32;
    let mut start = buffer.iter_at_offset(start_chars);
    let end = buffer.iter_at_offset(end_chars);
    buffer.apply_tag_by_name(HIGHLIGHT_TAG, &start, &end);
    view.scroll_to_iter(&mut start, 0.1, false, 0.0, 0.0);
}

fn push_status(statusbar: &Statusbar, message: &str) {
    let context = statusbar.context_id("actions");
    statusbar.push(context, message);
}

fn present_error(window: &ApplicationWindow, statusbar: &Statusbar, err: &ActionError) {
    let kind = if err.is_warning() {
        gtk::MessageType::Warning
    } else {
        gtk::MessageType::Error
    };
    show_message(window, kind, &err.to_string());
    push_status(statusbar, &err.to_string());
}

fn show_message(window: &ApplicationWindow, kind: gtk::MessageType, message: &str) {
    let dialog = MessageDialog::new(
        Some(window),
        gtk::DialogFlags::MODAL,
        kind,
        gtk::ButtonsType::Ok,
        message,
    );
    dialog.run();
    dialog.close();
}

fn confirm(window: &ApplicationWindow, message: &str) -> bool {
    let dialog = MessageDialog::new(
        Some(window),
        gtk::DialogFlags::MODAL,
        gtk::MessageType::Question,
        gtk::ButtonsType::YesNo,
        message,
    );
    let response = dialog.run();
    dialog.close();
    response == gtk::ResponseType::Yes
}
