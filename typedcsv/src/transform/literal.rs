//! Restricted literal parser for array cells.
//!
//! Accepts constant literals only: numbers, quoted strings, `True`, `False`,
//! `None`, and lists, tuples, sets and dicts of those. There are no names,
//! calls, operators (apart from a sign on a number) or anything else that
//! could evaluate code.
//!
//! ```text
//! "[1, 2, 3]"        -> List[Int(1), Int(2), Int(3)]
//! "('a', 'b')"       -> Tuple[Str(a), Str(b)]
//! "1, 2"             -> Tuple[Int(1), Int(2)]
//! "{'k': [True]}"    -> Dict[(Str(k), List[Bool(true)])]
//! ```

use crate::error::ArrayError;

/// Deepest container nesting accepted in one cell.
pub const MAX_DEPTH: usize = 200;

/// A parsed literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    /// Integer outside the 64-bit range, kept as its decimal digits.
    BigInt(String),
    Float(f64),
    Bool(bool),
    None,
    Str(String),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
    Set(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Int(_) | Literal::BigInt(_) => "int",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "bool",
            Literal::None => "None",
            Literal::Str(_) => "str",
            Literal::List(_) => "list",
            Literal::Tuple(_) => "tuple",
            Literal::Set(_) => "set",
            Literal::Dict(_) => "dict",
        }
    }

    fn is_hashable(&self) -> bool {
        match self {
            Literal::List(_) | Literal::Set(_) | Literal::Dict(_) => false,
            Literal::Tuple(items) => items.iter().all(Literal::is_hashable),
            _ => true,
        }
    }

    /// The elements produced by iterating this literal.
    ///
    /// Sequences yield their items, dicts their keys, strings their
    /// characters. Scalars are not iterable.
    pub fn into_elements(self) -> Result<Vec<Literal>, ArrayError> {
        match self {
            Literal::List(items) | Literal::Tuple(items) | Literal::Set(items) => Ok(items),
            Literal::Dict(pairs) => Ok(pairs.into_iter().map(|(key, _)| key).collect()),
            Literal::Str(s) => Ok(s.chars().map(|c| Literal::Str(c.to_string())).collect()),
            other => Err(ArrayError::NotIterable(other.kind())),
        }
    }

    /// Display form: strings as-is, everything else as its literal spelling.
    pub fn to_display(&self) -> String {
        match self {
            Literal::Str(s) => s.clone(),
            other => other.to_repr(),
        }
    }

    /// Literal spelling, with strings quoted.
    pub fn to_repr(&self) -> String {
        match self {
            Literal::Int(n) => n.to_string(),
            Literal::BigInt(digits) => digits.clone(),
            Literal::Float(f) => format_float(*f),
            Literal::Bool(true) => "True".to_string(),
            Literal::Bool(false) => "False".to_string(),
            Literal::None => "None".to_string(),
            Literal::Str(s) => quote(s),
            Literal::List(items) => format!("[{}]", join_repr(items)),
            Literal::Tuple(items) if items.len() == 1 => format!("({},)", items[0].to_repr()),
            Literal::Tuple(items) => format!("({})", join_repr(items)),
            Literal::Set(items) if items.is_empty() => "set()".to_string(),
            Literal::Set(items) => format!("{{{}}}", join_repr(items)),
            Literal::Dict(pairs) => {
                let body: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.to_repr(), v.to_repr()))
                    .collect();
                format!("{{{}}}", body.join(", "))
            }
        }
    }
}

fn join_repr(items: &[Literal]) -> String {
    items.iter().map(Literal::to_repr).collect::<Vec<_>>().join(", ")
}

fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

/// Shortest round-trip spelling of a float: `3.0`, `0.1`, `1e+16`, `1e-05`,
/// `inf`, `nan`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let debug = format!("{:?}", f);
    match debug.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => debug,
    }
}

/// Parse a literal expression.
pub fn parse_literal(input: &str) -> Result<Literal, ArrayError> {
    let mut parser = Parser {
        src: input,
        pos: 0,
        depth: 0,
    };
    parser.skip_ws();
    let first = parser.parse_value()?;
    parser.skip_ws();

    // A bare top-level comma list is a tuple.
    let literal = if parser.peek() == Some(',') {
        let mut items = vec![first];
        while parser.eat(',') {
            parser.skip_ws();
            if parser.peek().is_none() {
                break;
            }
            items.push(parser.parse_value()?);
            parser.skip_ws();
        }
        Literal::Tuple(items)
    } else {
        first
    };

    parser.skip_ws();
    if parser.pos < parser.src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(literal)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> ArrayError {
        ArrayError::Literal {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn rest(&self) -> &'a str {
        let src = self.src;
        &src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ArrayError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", expected)))
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    /// Run `parse` one container level deeper.
    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Literal, ArrayError>,
    ) -> Result<Literal, ArrayError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_value(&mut self) -> Result<Literal, ArrayError> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('[') => self.nested(|p| {
                p.bump();
                p.parse_items(']').map(Literal::List)
            }),
            Some('(') => self.nested(Self::parse_paren),
            Some('{') => self.nested(Self::parse_brace),
            Some('\'') | Some('"') => self.parse_strings(),
            Some('+') | Some('-') => self.parse_signed(),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some('.') if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => self.parse_number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_name(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
        }
    }

    /// Comma-separated values up to `close`, trailing comma allowed.
    fn parse_items(&mut self, close: char) -> Result<Vec<Literal>, ArrayError> {
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            if self.eat(close) {
                return Ok(items);
            }
            self.expect(',')?;
        }
    }

    fn parse_paren(&mut self) -> Result<Literal, ArrayError> {
        self.bump();
        self.skip_ws();
        if self.eat(')') {
            return Ok(Literal::Tuple(Vec::new()));
        }
        let first = self.parse_value()?;
        self.skip_ws();
        if self.eat(')') {
            // Plain parentheses around a single value.
            return Ok(first);
        }
        self.expect(',')?;
        let mut items = vec![first];
        items.extend(self.parse_items(')')?);
        Ok(Literal::Tuple(items))
    }

    fn parse_brace(&mut self) -> Result<Literal, ArrayError> {
        self.bump();
        self.skip_ws();
        if self.eat('}') {
            return Ok(Literal::Dict(Vec::new()));
        }
        let first = self.parse_value()?;
        self.skip_ws();
        if self.eat(':') {
            self.parse_dict(first)
        } else {
            self.parse_set(first)
        }
    }

    fn parse_dict(&mut self, first_key: Literal) -> Result<Literal, ArrayError> {
        let mut pairs: Vec<(Literal, Literal)> = Vec::new();
        let mut key = first_key;
        loop {
            if !key.is_hashable() {
                return Err(self.error(format!("unhashable dict key of type {}", key.kind())));
            }
            self.skip_ws();
            let value = self.parse_value()?;
            match pairs.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => pairs.push((key, value)),
            }
            self.skip_ws();
            if self.eat('}') {
                return Ok(Literal::Dict(pairs));
            }
            self.expect(',')?;
            self.skip_ws();
            if self.eat('}') {
                return Ok(Literal::Dict(pairs));
            }
            key = self.parse_value()?;
            self.skip_ws();
            self.expect(':')?;
        }
    }

    fn parse_set(&mut self, first: Literal) -> Result<Literal, ArrayError> {
        let mut items = vec![first];
        if !self.eat('}') {
            self.expect(',')?;
            items.extend(self.parse_items('}')?);
        }
        let mut unique: Vec<Literal> = Vec::with_capacity(items.len());
        for item in items {
            if !item.is_hashable() {
                return Err(self.error(format!("unhashable set element of type {}", item.kind())));
            }
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Ok(Literal::Set(unique))
    }

    /// One or more adjacent string literals, concatenated.
    fn parse_strings(&mut self) -> Result<Literal, ArrayError> {
        let mut out = self.parse_string()?;
        loop {
            let save = self.pos;
            self.skip_ws();
            match self.peek() {
                Some('\'') | Some('"') => out.push_str(&self.parse_string()?),
                _ => {
                    self.pos = save;
                    return Ok(Literal::Str(out));
                }
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, ArrayError> {
        let start = self.pos;
        let quote = self.bump().ok_or_else(|| self.error("expected string"))?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    self.pos = start;
                    return Err(self.error("unterminated string"));
                }
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.parse_escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), ArrayError> {
        let c = self.bump().ok_or_else(|| self.error("unterminated escape"))?;
        match c {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            'x' => out.push(self.parse_hex_escape(2)?),
            'u' => out.push(self.parse_hex_escape(4)?),
            'U' => out.push(self.parse_hex_escape(8)?),
            '0'..='7' => {
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).ok_or_else(|| self.error("invalid octal escape"))?);
            }
            other => {
                // Unknown escapes are kept verbatim.
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Result<char, ArrayError> {
        let end = self.pos + digits;
        let hex = self
            .src
            .get(self.pos..end)
            .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("truncated hex escape"))?;
        let code = u32::from_str_radix(hex, 16).map_err(|e| self.error(e.to_string()))?;
        let c = char::from_u32(code).ok_or_else(|| self.error("invalid code point"))?;
        self.pos = end;
        Ok(c)
    }

    fn parse_signed(&mut self) -> Result<Literal, ArrayError> {
        let negative = self.bump() == Some('-');
        self.skip_ws();
        let starts_number = match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        };
        if !starts_number {
            return Err(self.error("sign must be followed by a number"));
        }
        let number = self.parse_number()?;
        Ok(negate(number, negative))
    }

    fn parse_number(&mut self) -> Result<Literal, ArrayError> {
        let start = self.pos;
        let rest = self.rest();
        let lower = rest.get(..2).map(str::to_ascii_lowercase);
        let radix = match lower.as_deref() {
            Some("0x") => Some(16),
            Some("0o") => Some(8),
            Some("0b") => Some(2),
            _ => None,
        };

        if let Some(radix) = radix {
            self.pos += 2;
            let digits = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
            let cleaned = strip_underscores(digits.strip_prefix('_').unwrap_or(digits), radix)
                .ok_or_else(|| self.error("invalid underscore in number"))?;
            if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_digit(radix)) {
                return Err(self.error(format!("invalid base-{} literal", radix)));
            }
            return Ok(match i64::from_str_radix(&cleaned, radix) {
                Ok(n) => Literal::Int(n),
                Err(_) => match u128::from_str_radix(&cleaned, radix) {
                    Ok(n) => Literal::BigInt(n.to_string()),
                    Err(_) => return Err(self.error("integer literal too large")),
                },
            });
        }

        let mut is_float = false;
        self.take_while(|c| c.is_ascii_digit() || c == '_');
        if self.peek() == Some('.') {
            is_float = true;
            self.bump();
            self.take_while(|c| c.is_ascii_digit() || c == '_');
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            let save = self.pos;
            self.bump();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.bump();
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.take_while(|c| c.is_ascii_digit() || c == '_');
            } else {
                self.pos = save;
            }
        }
        if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            return Err(self.error("invalid number literal"));
        }

        let text = &self.src[start..self.pos];
        let cleaned = strip_underscores(text, 10).ok_or_else(|| self.error("invalid underscore in number"))?;

        if is_float {
            return cleaned
                .parse::<f64>()
                .map(Literal::Float)
                .map_err(|_| self.error("invalid float literal"));
        }
        if cleaned.len() > 1 && cleaned.starts_with('0') && cleaned.bytes().any(|b| b != b'0') {
            return Err(self.error("leading zeros in integer literal"));
        }
        Ok(match cleaned.parse::<i64>() {
            Ok(n) => Literal::Int(n),
            Err(_) => Literal::BigInt(cleaned),
        })
    }

    fn parse_name(&mut self) -> Result<Literal, ArrayError> {
        let start = self.pos;
        let name = self.take_while(|c| c.is_alphanumeric() || c == '_');
        match name {
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            "None" => Ok(Literal::None),
            other => {
                self.pos = start;
                Err(self.error(format!("'{}' is not a literal", other)))
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        let src = self.src;
        &src[start..self.pos]
    }
}

fn negate(literal: Literal, negative: bool) -> Literal {
    if !negative {
        return literal;
    }
    match literal {
        // Unsigned literals fit in 0..=i64::MAX, so this cannot overflow.
        Literal::Int(n) => Literal::Int(-n),
        Literal::BigInt(digits) => {
            let negated = format!("-{}", digits);
            match negated.parse::<i64>() {
                Ok(n) => Literal::Int(n),
                Err(_) => Literal::BigInt(negated),
            }
        }
        Literal::Float(f) => Literal::Float(-f),
        other => other,
    }
}

/// Remove digit-group underscores. `None` if an underscore is not between two
/// digits.
pub(crate) fn strip_underscores(text: &str, radix: u32) -> Option<String> {
    if !text.contains('_') {
        return Some(text.to_string());
    }
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let before = i.checked_sub(1).and_then(|j| chars.get(j));
            let after = chars.get(i + 1);
            let is_digit = |d: Option<&char>| d.is_some_and(|d| d.is_digit(radix));
            if !is_digit(before) || !is_digit(after) {
                return None;
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Literal> {
        values.iter().map(|&n| Literal::Int(n)).collect()
    }

    #[test]
    fn test_list_of_ints() {
        assert_eq!(parse_literal("[1, 2, 3]").unwrap(), Literal::List(ints(&[1, 2, 3])));
        assert_eq!(parse_literal(" [1,2,3,] ").unwrap(), Literal::List(ints(&[1, 2, 3])));
        assert_eq!(parse_literal("[]").unwrap(), Literal::List(vec![]));
    }

    #[test]
    fn test_strings_and_escapes() {
        let parsed = parse_literal(r#"['a', "b", 'it\'s', "tab\there", '\x41é']"#).unwrap();
        assert_eq!(
            parsed,
            Literal::List(vec![
                Literal::Str("a".into()),
                Literal::Str("b".into()),
                Literal::Str("it's".into()),
                Literal::Str("tab\there".into()),
                Literal::Str("Aé".into()),
            ])
        );
        assert_eq!(parse_literal("'ab' 'cd'").unwrap(), Literal::Str("abcd".into()));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_literal("-5").unwrap(), Literal::Int(-5));
        assert_eq!(parse_literal("1_000").unwrap(), Literal::Int(1000));
        assert_eq!(parse_literal("0x1F").unwrap(), Literal::Int(31));
        assert_eq!(parse_literal("0b101").unwrap(), Literal::Int(5));
        assert_eq!(parse_literal("2.5").unwrap(), Literal::Float(2.5));
        assert_eq!(parse_literal(".5").unwrap(), Literal::Float(0.5));
        assert_eq!(parse_literal("5.").unwrap(), Literal::Float(5.0));
        assert_eq!(parse_literal("1e3").unwrap(), Literal::Float(1000.0));
        assert_eq!(parse_literal("00").unwrap(), Literal::Int(0));
        assert!(parse_literal("007").is_err());
        assert!(parse_literal("1__0").is_err());
        assert!(parse_literal("3j").is_err());
        assert!(parse_literal("--5").is_err());
        assert!(parse_literal("1_e5").is_err());
    }

    #[test]
    fn test_integers_beyond_64_bits() {
        assert_eq!(
            parse_literal("[12345678901234567890, 7]").unwrap(),
            Literal::List(vec![Literal::BigInt("12345678901234567890".into()), Literal::Int(7)])
        );
        assert_eq!(
            parse_literal("-99999999999999999999").unwrap(),
            Literal::BigInt("-99999999999999999999".into())
        );
        assert_eq!(parse_literal("-9223372036854775808").unwrap(), Literal::Int(i64::MIN));
        assert_eq!(
            parse_literal("0xFFFFFFFFFFFFFFFF").unwrap(),
            Literal::BigInt("18446744073709551615".into())
        );
        let big = Literal::BigInt("12345678901234567890".into());
        assert_eq!(big.kind(), "int");
        assert_eq!(big.to_display(), "12345678901234567890");
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));

        assert!(parse_literal(&nested(MAX_DEPTH)).is_ok());
        assert!(matches!(
            parse_literal(&nested(MAX_DEPTH + 1)),
            Err(ArrayError::Literal { message, .. }) if message == "nesting too deep"
        ));
        assert!(parse_literal(&"[".repeat(100_000)).is_err());
        assert!(parse_literal(&"({".repeat(50_000)).is_err());
    }

    #[test]
    fn test_containers() {
        assert_eq!(parse_literal("(1,)").unwrap(), Literal::Tuple(ints(&[1])));
        assert_eq!(parse_literal("(1)").unwrap(), Literal::Int(1));
        assert_eq!(parse_literal("1, 2").unwrap(), Literal::Tuple(ints(&[1, 2])));
        assert_eq!(parse_literal("{1, 2, 1}").unwrap(), Literal::Set(ints(&[1, 2])));
        assert_eq!(
            parse_literal("{'a': 1, 'b': [2]}").unwrap(),
            Literal::Dict(vec![
                (Literal::Str("a".into()), Literal::Int(1)),
                (Literal::Str("b".into()), Literal::List(ints(&[2]))),
            ])
        );
        assert_eq!(
            parse_literal("[[1], (True, None)]").unwrap(),
            Literal::List(vec![
                Literal::List(ints(&[1])),
                Literal::Tuple(vec![Literal::Bool(true), Literal::None]),
            ])
        );
    }

    #[test]
    fn test_rejects_non_literals() {
        for input in [
            "",
            "not a list",
            "[1, 2",
            "__import__('os')",
            "[x for x in y]",
            "1 + 2",
            "{[1]: 2}",
            "{[1], 2}",
            "'unterminated",
            "[1] [2]",
        ] {
            assert!(parse_literal(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_into_elements() {
        let dict = parse_literal("{'a': 1, 'b': 2}").unwrap();
        assert_eq!(
            dict.into_elements().unwrap(),
            vec![Literal::Str("a".into()), Literal::Str("b".into())]
        );
        let chars = Literal::Str("ab".into()).into_elements().unwrap();
        assert_eq!(chars, vec![Literal::Str("a".into()), Literal::Str("b".into())]);
        assert_eq!(
            Literal::Int(5).into_elements(),
            Err(ArrayError::NotIterable("int"))
        );
    }

    #[test]
    fn test_display_forms() {
        let nested = parse_literal("[1, 'a', (2.0,), {'k': None}, False]").unwrap();
        assert_eq!(nested.to_display(), "[1, 'a', (2.0,), {'k': None}, False]");
        assert_eq!(Literal::Str("it's".into()).to_repr(), "\"it's\"");
        assert_eq!(Literal::Str("plain".into()).to_display(), "plain");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e-7), "1.5e-07");
        assert_eq!(format_float(-2.5e20), "-2.5e+20");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NAN), "nan");
    }
}
