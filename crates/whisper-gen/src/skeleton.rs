//! The fixed C translation-unit skeleton every compile produces
//! (spec.md section 4.G): includes, prototypes, struct declarations,
//! function definitions, then `main`.

pub fn assemble(prototypes: &[String], structs: &str, funcs: &str, main_body: &str) -> String {
    format!(
        "#include <stdio.h>\n#include <string.h>\n#include \"lisp_def.c\"\n\n\
         // prototypes\n{protos}\n\n\
         // variable definitions\n{structs}\n\n\
         // function definitions\n{funcs}\n\n\
         int main() {{ {main_body}return 0; }}\n",
        protos = prototypes.join("\n"),
        structs = structs,
        funcs = funcs,
        main_body = main_body,
    )
}
