use anyhow::Result;
use indoc::indoc;
use serde_derive::Serialize;
use yamlconf::describe::{DescriptionProvider, Registered};
use yamlconf::{Document, Engine, Format, MemberId, YamlConf, YamlFormat};

// Numbers in different bases.
#[derive(Serialize, YamlFormat)]
struct Coordinate {
    #[yaml(format = hex)]
    x: u32,
    #[yaml(format = dec)]
    y: u32,
    #[yaml(format = oct)]
    z: u16,
    #[yaml(format = bin)]
    flags: u8,
}

// Descriptions on the type, one line per attribute.
#[derive(Serialize, YamlFormat)]
#[yaml(description = "Server list entry")]
#[yaml(description = "Shown to every client")]
struct Entry {
    motd: &'static str,
    #[yaml(format = hex)]
    protocol: Option<u16>,
}

// A containing struct which does not implement YamlFormat.
#[derive(Serialize)]
struct Outer {
    coordinate: Coordinate,
}

#[derive(Serialize, YamlFormat)]
struct Color(#[yaml(format = hex)] u32, u8);

#[derive(Serialize, YamlFormat)]
#[yaml(description = "Palette entry")]
enum Paint {
    Rgb(#[yaml(format = hex)] u32),
    Named {
        name: &'static str,
        #[yaml(format = hex)]
        code: u8,
    },
}

#[test]
fn test_coordinate() -> Result<()> {
    let coordinate = Coordinate {
        x: 16,
        y: 10,
        z: 8,
        flags: 5,
    };
    let expected = indoc! {"
        x: 0x00000010
        y: 10
        z: 0o000010
        flags: 0b00000101
    "};
    assert_eq!(yamlconf::to_string(&coordinate)?, expected);
    Ok(())
}

#[test]
fn test_nested_formats() -> Result<()> {
    let outer = Outer {
        coordinate: Coordinate {
            x: 255,
            y: 1,
            z: 1,
            flags: 0,
        },
    };
    let expected = indoc! {"
        coordinate:
          x: 0x000000ff
          y: 1
          z: 0o000001
          flags: 0b00000000
    "};
    assert_eq!(yamlconf::to_string(&outer)?, expected);
    Ok(())
}

#[test]
fn test_optional_field_format() -> Result<()> {
    let entry = Entry {
        motd: "hello",
        protocol: Some(47),
    };
    assert_eq!(yamlconf::to_string(&entry)?, "motd: hello\nprotocol: 0x002f\n");
    Ok(())
}

#[test]
fn test_tuple_struct_format() -> Result<()> {
    assert_eq!(yamlconf::to_string(&Color(0xff8800, 7))?, "- 0x00ff8800\n- 7\n");
    Ok(())
}

#[test]
fn test_enum_formats() -> Result<()> {
    assert_eq!(yamlconf::to_string(&Paint::Rgb(0xff))?, "Rgb: 0x000000ff\n");
    let named = Paint::Named {
        name: "red",
        code: 12,
    };
    assert_eq!(yamlconf::to_string(&named)?, "Named:\n  name: red\n  code: 0x0c\n");
    Ok(())
}

#[test]
fn test_trait_methods() {
    assert_eq!(
        <Entry as YamlFormat>::description(),
        ["Server list entry", "Shown to every client"],
    );
    assert!(<Coordinate as YamlFormat>::description().is_empty());
    assert_eq!(
        <Coordinate as YamlFormat>::format(None, &MemberId::Name("x")),
        Some(Format::Hex),
    );
    assert_eq!(<Coordinate as YamlFormat>::format(None, &MemberId::Name("w")), None);
    assert_eq!(
        <Color as YamlFormat>::format(None, &MemberId::Index(0)),
        Some(Format::Hex),
    );
    assert_eq!(
        <Paint as YamlFormat>::format(Some("Named"), &MemberId::Name("code")),
        Some(Format::Hex),
    );
    assert_eq!(<Paint as YamlFormat>::format(None, &MemberId::Name("code")), None);
}

#[test]
fn test_registered_descriptions() {
    let entry = Entry {
        motd: "hello",
        protocol: None,
    };
    assert_eq!(
        Registered.describe(&entry),
        Some(vec![
            "Server list entry".to_owned(),
            "Shown to every client".to_owned(),
        ]),
    );

    // Registered without description lines.
    let coordinate = Coordinate {
        x: 0,
        y: 0,
        z: 0,
        flags: 0,
    };
    assert_eq!(Registered.describe(&coordinate), None);

    // Not registered at all.
    let outer = Outer { coordinate };
    assert_eq!(Registered.describe(&outer), None);
}

#[test]
fn test_registered_through_reference() {
    let paint = Paint::Rgb(1);
    let reference = &paint;
    let document: &dyn Document = &reference;
    assert!(document.type_name().starts_with('&'));
    assert_eq!(
        Registered.describe(document),
        Some(vec!["Palette entry".to_owned()]),
    );
}

#[test]
fn test_dump_all_with_derived_descriptions() -> Result<()> {
    let engine = Engine::default();
    let conf = YamlConf::new(&engine);
    let entry = Entry {
        motd: "hi",
        protocol: Some(4),
    };
    let paint = Paint::Rgb(0x10);
    let documents: [&dyn Document; 2] = [&entry, &paint];
    let yaml = conf.dump_all_with_header(&["servers.yml"], &documents)?;
    let expected = indoc! {"
        # servers.yml

        # Server list entry
        # Shown to every client
        --- motd: hi
        protocol: 0x0004

        # Palette entry
        --- Rgb: 0x00000010
    "};
    assert_eq!(yaml, expected);
    Ok(())
}
