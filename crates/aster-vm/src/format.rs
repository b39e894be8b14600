//! Turning a runtime `Value` into the string `print()` and uncaught-error
//! reporting both need. Kept out of `aster-core` since only the VM (which
//! already depends on both `aster-core` and `aster-stdlib`) ever needs to
//! render a `BoundMethod`/`NativeModule` by name.

use aster_core::{Heap, Obj, Value};

pub fn stringify(heap: &Heap, value: Value) -> String {
    match value {
        Value::Empty => "empty".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format_float(f),
        Value::Obj(r) => match heap.get(r) {
            Obj::Str(s) => s.clone(),
            Obj::Array(items) => format!("[{}]", join(heap, items.iter().copied())),
            Obj::List(items) => format!("[{}]", join(heap, items.iter().copied())),
            Obj::Dict(map) => {
                let mut parts: Vec<String> =
                    map.values().map(|(k, v)| format!("{}: {}", stringify(heap, *k), stringify(heap, *v))).collect();
                parts.sort();
                format!("{{{}}}", parts.join(", "))
            }
            Obj::Record(rec) => {
                let mut fields: Vec<_> = rec.fields.iter().collect();
                fields.sort_by(|a, b| a.0.cmp(b.0));
                let body: Vec<String> = fields.into_iter().map(|(k, v)| format!("{k}: {}", stringify(heap, *v))).collect();
                format!("{}{{{}}}", rec.type_name, body.join(", "))
            }
            Obj::Fn(f) => format!("<fn {}>", f.name),
            Obj::Closure(c) => match heap.get(c.func) {
                Obj::Fn(f) => format!("<fn {}>", f.name),
                _ => "<fn>".to_string(),
            },
            Obj::NativeFn(nf) => format!("<native fn {}>", nf.name),
            Obj::BoundMethod(bm) => format!("<bound method {}>", bm.name),
            Obj::Module(m) => format!("<module {}>", m.name),
            Obj::NativeModule(nm) => format!("<native module {}>", nm.name),
            Obj::ForeignFn(ff) => format!("<foreign fn {}>", ff.symbol),
            Obj::ForeignLib(fl) => format!("<foreign lib {}>", fl.path),
        },
    }
}

fn join(heap: &Heap, items: impl Iterator<Item = Value>) -> String {
    items.map(|v| stringify(heap, v)).collect::<Vec<_>>().join(", ")
}

/// Matches the teacher's `%.8f` float rendering: always eight fractional
/// digits, no scientific notation, regardless of magnitude or fraction.
fn format_float(f: f64) -> String {
    format!("{f:.8}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_get_eight_fractional_digits() {
        assert_eq!(format_float(4.0), "4.00000000");
        assert_eq!(format_float(-2.0), "-2.00000000");
    }

    #[test]
    fn fractional_floats_pad_to_eight_digits() {
        assert_eq!(format_float(3.14), "3.14000000");
    }

    #[test]
    fn primitives_stringify_without_quoting() {
        let heap = Heap::new();
        assert_eq!(stringify(&heap, Value::Int(42)), "42");
        assert_eq!(stringify(&heap, Value::Bool(true)), "true");
        assert_eq!(stringify(&heap, Value::Empty), "empty");
    }

    #[test]
    fn strings_stringify_without_surrounding_quotes() {
        let mut heap = Heap::new();
        let r = heap.alloc(Obj::Str("hi".to_string()));
        assert_eq!(stringify(&heap, Value::Obj(r)), "hi");
    }

    #[test]
    fn arrays_stringify_as_bracketed_elements() {
        let mut heap = Heap::new();
        let r = heap.alloc(Obj::Array(vec![Value::Int(1), Value::Int(2)].into_boxed_slice()));
        assert_eq!(stringify(&heap, Value::Obj(r)), "[1, 2]");
    }
}
