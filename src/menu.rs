//! Selectable menu lists shared by every menu screen.
//!
//! Items carry a typed action tag instead of a callback. [`Menu::handle_input`]
//! reports what happened as a [`MenuOutcome`] and the owning screen applies it.

use crate::input::Input;
use crate::renderer::MenuView;

/// Result of feeding one input to a [`Menu`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MenuOutcome<A> {
    /// The input had no effect.
    Ignored,
    /// The menu consumed the input without emitting an action: navigation,
    /// or a slider already at its limit.
    Handled,
    /// A text item was executed.
    Activated(A),
    /// A slider moved to a new value.
    ValueChanged(A, i32),
    /// A toggle flipped to a new state.
    Toggled(A, bool),
}

impl<A> MenuOutcome<A> {
    #[must_use]
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Plain label that emits its action when executed. Items without an action
/// are headings and cannot be selected.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TextItem<A> {
    label: String,
    action: Option<A>,
    selected: bool,
}

/// Integer value stepped by one inside `[min, max]`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SliderItem<A> {
    label: String,
    action: A,
    min: i32,
    max: i32,
    value: i32,
    selected: bool,
}

impl<A: Copy> SliderItem<A> {
    /// Creates a slider; `value` is clamped into range.
    #[must_use]
    pub fn new(label: impl Into<String>, min: i32, max: i32, value: i32, action: A) -> Self {
        let max = max.max(min);
        Self {
            label: label.into(),
            action,
            min,
            max,
            value: value.clamp(min, max),
            selected: false,
        }
    }

    /// Steps up. Returns the new value only when it changed.
    pub fn increment(&mut self) -> Option<i32> {
        self.set_value(self.value.saturating_add(1))
    }

    /// Steps down. Returns the new value only when it changed.
    pub fn decrement(&mut self) -> Option<i32> {
        self.set_value(self.value.saturating_sub(1))
    }

    fn set_value(&mut self, value: i32) -> Option<i32> {
        let value = value.clamp(self.min, self.max);
        if value == self.value {
            return None;
        }

        self.value = value;
        Some(value)
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    #[must_use]
    pub fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    fn outcome(&self, changed: Option<i32>) -> MenuOutcome<A> {
        changed.map_or(MenuOutcome::Handled, |value| {
            MenuOutcome::ValueChanged(self.action, value)
        })
    }
}

/// On/off switch.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ToggleItem<A> {
    label: String,
    action: A,
    on: bool,
    selected: bool,
}

impl<A: Copy> ToggleItem<A> {
    #[must_use]
    pub fn new(label: impl Into<String>, on: bool, action: A) -> Self {
        Self {
            label: label.into(),
            action,
            on,
            selected: false,
        }
    }

    /// Flips the state and returns the new one.
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on
    }
}

/// One entry of a [`Menu`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MenuItem<A> {
    Text(TextItem<A>),
    Slider(SliderItem<A>),
    Toggle(ToggleItem<A>),
}

impl<A: Copy> MenuItem<A> {
    #[must_use]
    pub fn text(label: impl Into<String>, action: A) -> Self {
        Self::Text(TextItem {
            label: label.into(),
            action: Some(action),
            selected: false,
        })
    }

    /// Non-selectable caption.
    #[must_use]
    pub fn heading(label: impl Into<String>) -> Self {
        Self::Text(TextItem {
            label: label.into(),
            action: None,
            selected: false,
        })
    }

    #[must_use]
    pub fn slider(label: impl Into<String>, min: i32, max: i32, value: i32, action: A) -> Self {
        Self::Slider(SliderItem::new(label, min, max, value, action))
    }

    #[must_use]
    pub fn toggle(label: impl Into<String>, on: bool, action: A) -> Self {
        Self::Toggle(ToggleItem::new(label, on, action))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Text(item) => &item.label,
            Self::Slider(item) => &item.label,
            Self::Toggle(item) => &item.label,
        }
    }

    #[must_use]
    pub fn is_selectable(&self) -> bool {
        match self {
            Self::Text(item) => item.action.is_some(),
            Self::Slider(_) | Self::Toggle(_) => true,
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        *self.selected_flag()
    }

    pub fn select(&mut self) {
        *self.selected_flag_mut() = true;
    }

    pub fn deselect(&mut self) {
        *self.selected_flag_mut() = false;
    }

    /// Runs the default action: text items emit their action, sliders step
    /// up and toggles flip.
    pub fn execute(&mut self) -> MenuOutcome<A> {
        match self {
            Self::Text(item) => item
                .action
                .map_or(MenuOutcome::Ignored, MenuOutcome::Activated),
            Self::Slider(item) => {
                let changed = item.increment();
                item.outcome(changed)
            }
            Self::Toggle(item) => MenuOutcome::Toggled(item.action, item.toggle()),
        }
    }

    /// Text shown by renderers, including the current value for sliders and
    /// toggles.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(item) => item.label.clone(),
            Self::Slider(item) => format!("{}: < {} >", item.label, item.value),
            Self::Toggle(item) => {
                format!("{}: {}", item.label, if item.on { "ON" } else { "OFF" })
            }
        }
    }

    fn selected_flag(&self) -> &bool {
        match self {
            Self::Text(item) => &item.selected,
            Self::Slider(item) => &item.selected,
            Self::Toggle(item) => &item.selected,
        }
    }

    fn selected_flag_mut(&mut self) -> &mut bool {
        match self {
            Self::Text(item) => &mut item.selected,
            Self::Slider(item) => &mut item.selected,
            Self::Toggle(item) => &mut item.selected,
        }
    }
}

/// Ordered item list with a wrapping selection cursor.
///
/// While the menu holds a selectable item, the cursor points at one.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Menu<A> {
    items: Vec<MenuItem<A>>,
    selected: usize,
    instructions: String,
}

impl<A> Default for Menu<A> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            instructions: String::new(),
        }
    }
}

impl<A: Copy> Menu<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item and returns its index.
    pub fn add_item(&mut self, item: MenuItem<A>) -> usize {
        self.items.push(item);
        let index = self.items.len() - 1;

        if !self.selected_is_selectable() && self.items[index].is_selectable() {
            self.move_cursor(index);
        } else if self.items.len() == 1 {
            self.items[0].select();
        }

        index
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = 0;
    }

    /// Feeds one normalized input to the menu.
    pub fn handle_input(&mut self, input: Input) -> MenuOutcome<A> {
        if self.items.is_empty() {
            return MenuOutcome::Ignored;
        }

        match input {
            Input::Up => {
                self.select_previous();
                MenuOutcome::Handled
            }
            Input::Down => {
                self.select_next();
                MenuOutcome::Handled
            }
            Input::Select => self.execute_selected(),
            Input::Left => self.adjust_selected_slider(SliderItem::decrement),
            Input::Right => self.adjust_selected_slider(SliderItem::increment),
            Input::None | Input::Back | Input::Pause | Input::Quit => MenuOutcome::Ignored,
        }
    }

    /// Moves to the next selectable item, wrapping around.
    pub fn select_next(&mut self) {
        let len = self.items.len();
        self.step_cursor(|index| (index + 1) % len);
    }

    /// Moves to the previous selectable item, wrapping around.
    pub fn select_previous(&mut self) {
        let len = self.items.len();
        self.step_cursor(|index| (index + len - 1) % len);
    }

    pub fn execute_selected(&mut self) -> MenuOutcome<A> {
        self.items
            .get_mut(self.selected)
            .map_or(MenuOutcome::Ignored, MenuItem::execute)
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&MenuItem<A>> {
        self.items.get(self.selected)
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&MenuItem<A>> {
        self.items.get(index)
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Display strings of every item, in order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(MenuItem::display_text).collect()
    }

    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.instructions = instructions.into();
    }

    /// Builds the renderer-facing description of this menu.
    #[must_use]
    pub fn view(&self, title: impl Into<String>) -> MenuView {
        MenuView {
            title: title.into(),
            items: self.labels(),
            selected: self.selected,
            instructions: self.instructions.clone(),
        }
    }

    fn adjust_selected_slider(
        &mut self,
        step: fn(&mut SliderItem<A>) -> Option<i32>,
    ) -> MenuOutcome<A> {
        match self.items.get_mut(self.selected) {
            Some(MenuItem::Slider(slider)) => {
                let changed = step(slider);
                slider.outcome(changed)
            }
            _ => MenuOutcome::Ignored,
        }
    }

    fn step_cursor(&mut self, next: impl Fn(usize) -> usize) {
        if self.items.is_empty() {
            return;
        }

        let start = self.selected;
        let mut index = start;
        loop {
            index = next(index);
            if index == start || self.items[index].is_selectable() {
                break;
            }
        }

        self.move_cursor(index);
    }

    fn move_cursor(&mut self, index: usize) {
        if let Some(current) = self.items.get_mut(self.selected) {
            current.deselect();
        }
        self.selected = index;
        self.items[index].select();
    }

    fn selected_is_selectable(&self) -> bool {
        self.items
            .get(self.selected)
            .is_some_and(MenuItem::is_selectable)
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Input;

    use super::{Menu, MenuItem, MenuOutcome, SliderItem, ToggleItem};

    #[derive(Debug, Clone, Copy, Eq, PartialEq)]
    enum Action {
        First,
        Second,
        Third,
        Volume,
        Mute,
    }

    fn three_items() -> Menu<Action> {
        let mut menu = Menu::new();
        menu.add_item(MenuItem::text("First", Action::First));
        menu.add_item(MenuItem::text("Second", Action::Second));
        menu.add_item(MenuItem::text("Third", Action::Third));
        menu
    }

    #[test]
    fn empty_menu_ignores_everything() {
        let mut menu: Menu<Action> = Menu::new();

        for input in [Input::Up, Input::Down, Input::Select, Input::Left] {
            assert_eq!(menu.handle_input(input), MenuOutcome::Ignored);
        }
        assert!(menu.selected_item().is_none());
    }

    #[test]
    fn navigation_wraps_in_both_directions() {
        let mut menu = three_items();
        assert_eq!(menu.selected_index(), 0);

        for _ in 0..3 {
            assert!(menu.handle_input(Input::Down).is_handled());
        }
        assert_eq!(menu.selected_index(), 0);

        menu.handle_input(Input::Up);
        assert_eq!(menu.selected_index(), 2);
        menu.handle_input(Input::Down);
        assert_eq!(menu.selected_index(), 0);
    }

    #[test]
    fn navigation_skips_headings() {
        let mut menu = Menu::new();
        menu.add_item(MenuItem::heading("Options"));
        menu.add_item(MenuItem::text("First", Action::First));
        menu.add_item(MenuItem::heading("More"));
        menu.add_item(MenuItem::text("Second", Action::Second));

        assert_eq!(menu.selected_index(), 1);

        menu.handle_input(Input::Down);
        assert_eq!(menu.selected_index(), 3);
        menu.handle_input(Input::Down);
        assert_eq!(menu.selected_index(), 1);
        menu.handle_input(Input::Up);
        assert_eq!(menu.selected_index(), 3);
    }

    #[test]
    fn single_selectable_item_still_reports_handled() {
        let mut menu = Menu::new();
        menu.add_item(MenuItem::heading("Title"));
        menu.add_item(MenuItem::text("Only", Action::First));

        assert_eq!(menu.handle_input(Input::Down), MenuOutcome::Handled);
        assert_eq!(menu.selected_index(), 1);
    }

    #[test]
    fn selected_flag_follows_the_cursor() {
        let mut menu = three_items();
        menu.handle_input(Input::Down);

        let flags: Vec<_> = (0..3)
            .map(|index| menu.item(index).map(MenuItem::is_selected))
            .collect();
        assert_eq!(flags, vec![Some(false), Some(true), Some(false)]);
    }

    #[test]
    fn select_activates_text_item() {
        let mut menu = three_items();
        menu.handle_input(Input::Down);

        assert_eq!(
            menu.handle_input(Input::Select),
            MenuOutcome::Activated(Action::Second)
        );
    }

    #[test]
    fn left_right_only_affect_sliders() {
        let mut menu = Menu::new();
        menu.add_item(MenuItem::text("First", Action::First));
        menu.add_item(MenuItem::slider("Volume", 1, 3, 2, Action::Volume));

        assert_eq!(menu.handle_input(Input::Right), MenuOutcome::Ignored);
        assert_eq!(menu.handle_input(Input::Left), MenuOutcome::Ignored);

        menu.handle_input(Input::Down);
        assert_eq!(
            menu.handle_input(Input::Right),
            MenuOutcome::ValueChanged(Action::Volume, 3)
        );
        assert_eq!(menu.handle_input(Input::Right), MenuOutcome::Handled);
        assert_eq!(
            menu.handle_input(Input::Left),
            MenuOutcome::ValueChanged(Action::Volume, 2)
        );
        assert_eq!(
            menu.handle_input(Input::Select),
            MenuOutcome::ValueChanged(Action::Volume, 3)
        );
        assert_eq!(menu.handle_input(Input::Select), MenuOutcome::Handled);
    }

    #[test]
    fn slider_clamps_and_reports_only_changes() {
        let mut slider = SliderItem::new("Speed", 1, 10, 42, Action::Volume);
        assert_eq!(slider.value(), 10);
        assert_eq!(slider.increment(), None);
        assert_eq!(slider.decrement(), Some(9));

        let mut slider = SliderItem::new("Speed", 1, 10, 1, Action::Volume);
        assert_eq!(slider.decrement(), None);
        assert_eq!(slider.value(), 1);
        assert_eq!(slider.range(), (1, 10));
    }

    #[test]
    fn toggle_always_reports_new_state() {
        let mut toggle = ToggleItem::new("Mute", false, Action::Mute);
        assert!(toggle.toggle());
        assert!(!toggle.toggle());
        assert!(!toggle.is_on());

        let mut menu = Menu::new();
        menu.add_item(MenuItem::toggle("Mute", true, Action::Mute));
        assert_eq!(
            menu.handle_input(Input::Select),
            MenuOutcome::Toggled(Action::Mute, false)
        );
        assert_eq!(
            menu.handle_input(Input::Select),
            MenuOutcome::Toggled(Action::Mute, true)
        );
    }

    #[test]
    fn display_text_includes_values() {
        let mut menu = Menu::new();
        menu.add_item(MenuItem::text("Start", Action::First));
        menu.add_item(MenuItem::slider("Speed", 1, 10, 5, Action::Volume));
        menu.add_item(MenuItem::toggle("Sound", false, Action::Mute));
        menu.set_instructions("Pick one");

        let view = menu.view("Title");

        assert_eq!(view.title, "Title");
        assert_eq!(view.items, vec!["Start", "Speed: < 5 >", "Sound: OFF"]);
        assert_eq!(view.selected, 0);
        assert_eq!(view.instructions, "Pick one");
    }

    #[test]
    fn back_pause_and_quit_are_left_to_the_screen() {
        let mut menu = three_items();
        assert_eq!(menu.handle_input(Input::Back), MenuOutcome::Ignored);
        assert_eq!(menu.handle_input(Input::Pause), MenuOutcome::Ignored);
        assert_eq!(menu.handle_input(Input::Quit), MenuOutcome::Ignored);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut menu = three_items();
        menu.handle_input(Input::Up);
        menu.clear();

        assert_eq!(menu.item_count(), 0);
        assert_eq!(menu.selected_index(), 0);
    }
}
