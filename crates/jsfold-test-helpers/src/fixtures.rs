//! Sample programs

/// Straight-line code mixing scalars, arrays and folding.
pub const STRAIGHT_LINE: &str = r#"
var width = 640;
var height = 480;
var depth = 4;
var bytes = width * height * depth;
var sizes = [width, height, depth];
print(bytes, sizes[0] + sizes[1]);
"#;

/// Loops, branches and functions that invalidate tracked names.
pub const CONTROL_FLOW: &str = r#"
var total = 0;
var limit = 10;
var table = [1, 2, 4, 8];
for (var i = 0; i < limit; i++) {
    total = total + table[i & 3];
}
if (total > limit) {
    table[0] = 16;
} else {
    table[0] = compute();
}
function compute() {
    var scale = 1 << 4;
    return scale * 2;
}
print(total, table[0], table[3] >> 1);
"#;

/// A program `repeat` statements long, for benchmarks.
pub fn large_program(repeat: usize) -> String {
    let mut source = String::new();
    for n in 0..repeat {
        source.push_str(&format!(
            "var a{n} = {n}; var b{n} = [a{n}, {n} * 2]; print(a{n} + b{n}[1] << 2);\n"
        ));
    }
    source
}
