use cursive::{
    view::{Nameable, Resizable},
    views::{Button, Dialog, DummyView, EditView, LinearLayout, TextView},
    Cursive,
};
use cursive_table_view::{TableView, TableViewItem};
use mmu_sim::{config::Config, mmu::Mmu, statements::parse_number};
use page_replacement::Policy;

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
enum Column {
    Slot,
    Address,
    Referenced,
    Cursor,
}

#[derive(Debug, Clone)]
struct FrameRow {
    slot: usize,
    virtual_address: u64,
    referenced: bool,
    cursor: &'static str,
}

impl TableViewItem<Column> for FrameRow {
    fn to_column(&self, column: Column) -> String {
        match column {
            Column::Slot => self.slot.to_string(),
            Column::Address if self.virtual_address == 0 => "-".to_string(),
            Column::Address => format!("{:#x}", self.virtual_address),
            Column::Referenced => (self.referenced as u8).to_string(),
            Column::Cursor => self.cursor.to_string(),
        }
    }

    fn cmp(&self, other: &Self, _column: Column) -> std::cmp::Ordering
    where
        Self: Sized,
    {
        self.slot.cmp(&other.slot)
    }
}

struct App {
    policy: Policy,
    mmu: Mmu,
}

impl App {
    fn new(policy: Policy) -> Self {
        App {
            policy,
            mmu: Mmu::new(policy),
        }
    }

    fn rows(&self) -> Vec<FrameRow> {
        let table = self.mmu.frames();
        table
            .frames()
            .iter()
            .enumerate()
            .map(|(slot, frame)| FrameRow {
                slot,
                virtual_address: frame.virtual_address,
                referenced: frame.referenced,
                cursor: match (slot == table.first(), slot == table.last()) {
                    (true, true) => "first/last",
                    (true, false) => "first",
                    (false, true) => "last",
                    (false, false) => "",
                },
            })
            .collect()
    }

    fn status(&self) -> String {
        let stats = self.mmu.stats();
        format!(
            "policy: {}  resident: {}/{}  translations: {}  faults: {}",
            self.policy,
            self.mmu.frames().len(),
            self.mmu.frames().capacity(),
            stats.translations,
            stats.faults
        )
    }
}

fn make_table() -> TableView<FrameRow, Column> {
    TableView::<FrameRow, Column>::new()
        .column(Column::Slot, "Slot", |c| c.width(6))
        .column(Column::Address, "Virtual address", |c| c)
        .column(Column::Referenced, "Ref", |c| c.width(5))
        .column(Column::Cursor, "Cursor", |c| c.width(12))
}

fn refresh(s: &mut Cursive) {
    let Some((rows, status)) = s.with_user_data(|app: &mut App| (app.rows(), app.status())) else {
        return;
    };
    s.call_on_name("frames", |view: &mut TableView<FrameRow, Column>| {
        view.set_items(rows)
    });
    s.call_on_name("status", |view: &mut TextView| view.set_content(status));
}

/// Reads the address box and hands the parsed address to `action`.
fn with_address(s: &mut Cursive, action: fn(&mut Mmu, u64)) {
    let input = s
        .call_on_name("address", |view: &mut EditView| view.get_content())
        .map(|content| content.to_string())
        .unwrap_or_default();
    match parse_number(input.trim()) {
        Ok(virtual_address) => {
            s.with_user_data(|app: &mut App| action(&mut app.mmu, virtual_address));
            log::info!("{} handled", input.trim());
            refresh(s);
        }
        Err(err) => s.add_layer(Dialog::info(err.to_string())),
    }
}

fn on_reset(s: &mut Cursive) {
    s.with_user_data(|app: &mut App| *app = App::new(app.policy));
    refresh(s);
}

fn main() {
    let policy = Config::from_args(std::env::args().skip(1))
        .map(|config| config.policy)
        .unwrap_or_default();

    cursive::logger::init();
    log::set_max_level(log::LevelFilter::Info);

    let mut siv = cursive::default();
    siv.add_global_callback('q', |s| s.quit());
    siv.add_global_callback('~', Cursive::toggle_debug_console);
    siv.set_user_data(App::new(policy));

    let buttons = LinearLayout::horizontal()
        .child(EditView::new().with_name("address").fixed_width(20))
        .child(DummyView)
        .child(Button::new("Map", |s| with_address(s, Mmu::map)))
        .child(Button::new("Access", |s| with_address(s, Mmu::access)))
        .child(Button::new("Reset", on_reset));

    siv.add_layer(
        Dialog::around(
            LinearLayout::vertical()
                .child(make_table().with_name("frames").min_size((50, 12)))
                .child(TextView::new("").with_name("status"))
                .child(DummyView)
                .child(buttons),
        )
        .title("Frame table"),
    );
    refresh(&mut siv);
    siv.run();
}
