// Example: flattening a contact book and assembling cells without an engine.
use section_list::{
    BasicSection, FlatDataSource, RowInfo, SectionIndexOptions, SectionList, SectionListOptions,
    SeparatorProps,
};

type Contacts = BasicSection<&'static str>;

fn main() {
    let sections = vec![
        BasicSection::new("A", vec!["Ada", "Alan"]),
        BasicSection::new("B", vec!["Barbara"]),
        BasicSection::new("C", vec![]),
        BasicSection::new("D", vec!["Dennis", "Donald"]),
    ];

    let options = SectionListOptions::new(|info: RowInfo<'_, Contacts>| {
        Some(format!("  {} ({}.{})", info.item, info.section_index, info.index))
    })
    .with_render_section_header(Some(|s: &Contacts| Some(format!("== {} ==", s.title))))
    .with_render_section_footer(Some(|s: &Contacts| {
        Some(format!("  -- {} contacts", s.data.len()))
    }))
    .with_item_separator(Some(|_: SeparatorProps<'_, Contacts>| Some("  ·".to_string())))
    .with_section_index_options(Some(
        SectionIndexOptions::new(|s: &Contacts| Some(s.title.clone()))
            .with_on_section_change(Some(|s: usize| println!("on_section_change({s})"))),
    ));

    let list = SectionList::new(options);
    let pass = list.render(&sections);

    println!(
        "entries={} sticky={:?}",
        pass.len(),
        pass.sticky_header_indices()
    );
    for e in pass.section_index() {
        println!("index label={} -> flat {}", e.label, e.flat_index);
    }

    for index in 0..pass.len() {
        let Some(cell) = pass.render_cell(index) else {
            continue;
        };
        let key = pass.key_for(index).unwrap_or_default();
        for line in cell.into_nodes() {
            println!("{key:>10} | {line}");
        }
    }

    // An engine reports which flat entries are on screen; the pass maps them back to a section.
    let viewable = [4, 5, 6].map(|index| section_list::ViewToken {
        index,
        is_viewable: true,
    });
    pass.on_viewable_items_changed(&viewable);
}
