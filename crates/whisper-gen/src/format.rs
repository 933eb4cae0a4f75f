//! Builds the `printf` format string for a `Print` node (spec.md
//! section 4.G): one conversion specifier per argument, space
//! separated, with a trailing newline.

use whisper_ast::Type;

pub fn printf_format(types: &[Type]) -> String {
    let specifiers: Vec<&str> = types
        .iter()
        .map(|t| match t {
            Type::Int => "%d",
            Type::Str => "%s",
            // Print only ever sees INT/STRING operands in a well-typed
            // program; VOID/NONE cannot reach here once `type_of` has
            // succeeded on the child.
            Type::Void | Type::None => "%d",
        })
        .collect();
    let mut fmt = specifiers.join(" ");
    fmt.push_str("\\n");
    fmt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_print_is_just_a_newline() {
        assert_eq!(printf_format(&[]), "\\n");
    }

    #[test]
    fn mixed_types_get_space_separated_specifiers() {
        assert_eq!(printf_format(&[Type::Int, Type::Str, Type::Int]), "%d %s %d\\n");
    }
}
