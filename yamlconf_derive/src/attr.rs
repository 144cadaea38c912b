use syn::parse::ParseStream;
use syn::{Attribute, Error, Ident, LitStr, Result, Token};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Format {
    Binary,
    Decimal,
    Hex,
    Octal,
}

#[derive(Debug)]
pub struct Attrs<'a> {
    pub yaml: Option<&'a Attribute>,
    pub format: Option<Format>,
    pub description: Vec<LitStr>,
}

pub fn get(input: &[Attribute]) -> Result<Attrs> {
    let mut attrs = Attrs {
        yaml: None,
        format: None,
        description: Vec::new(),
    };

    for attr in input {
        if attr.path.is_ident("yaml") {
            attrs.yaml = Some(attr);
            parse_yaml_attribute(&mut attrs, attr)?;
        }
    }
    Ok(attrs)
}

fn parse_yaml_attribute<'a>(attrs: &mut Attrs<'a>, attr: &'a Attribute) -> Result<()> {
    syn::custom_keyword!(format);
    syn::custom_keyword!(description);

    attr.parse_args_with(|input: ParseStream| {
        let mut more = true;
        while more {
            if input.peek(format) {
                let _kw = input.parse::<format>()?;
                let _eq: Token![=] = input.parse()?;
                let ident: Ident = input.parse()?;
                let value = match ident.to_string().as_str() {
                    "bin" => Format::Binary,
                    "dec" => Format::Decimal,
                    "oct" => Format::Octal,
                    "hex" => Format::Hex,
                    _ => return Err(Error::new_spanned(ident, "unknown yaml format")),
                };
                if attrs.format.is_some() {
                    return Err(Error::new_spanned(attr, "duplicate yaml format"));
                }
                attrs.format = Some(value);
            } else if input.peek(description) {
                let _kw = input.parse::<description>()?;
                let _eq: Token![=] = input.parse()?;
                let line: LitStr = input.parse()?;
                attrs.description.push(line);
            } else {
                return Err(input.error("expected `format` or `description`"));
            }

            more = input.peek(Token![,]);
            if more {
                let _comma: Token![,] = input.parse()?;
                more = !input.is_empty();
            }
        }
        Ok(())
    })
}
