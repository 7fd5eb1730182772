//! Program fixtures
//!
//! Each fixture returns the built program together with the handles the
//! tests assert on.

use super::builders::*;
use codegraph_analysis::shared::models::{
    BinaryOp, ClassId, FieldId, MethodId, Program, ProgramBuilder, Stmt, Type, VarId,
};

pub struct AliasFixture {
    pub program: Program,
    pub main: MethodId,
    pub x: VarId,
    pub y: VarId,
    pub f: FieldId,
}

/// `x = new A(); y = x; y.f = x;`
pub fn fixture_alias() -> AliasFixture {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    let f = b.add_field(a, "f", Type::Class(a), false);
    let main = b.add_method(a, "void main()", true);
    let x = b.new_var(main, "x", Type::Class(a));
    let y = b.new_var(main, "y", Type::Class(a));
    b.set_body(
        main,
        None,
        vec![],
        vec![new_obj(x, a), copy(y, x), store(y, f, x), ret(None)],
    );
    b.set_entry(main);
    AliasFixture {
        program: b.build().expect("alias fixture"),
        main,
        x,
        y,
        f,
    }
}

pub struct InheritedStaticFixture {
    pub program: Program,
    pub main: MethodId,
    pub inherited: MethodId,
}

/// `A.foo()` where `foo` is declared only in `A`'s superclass `B`
pub fn fixture_inherited_static() -> InheritedStaticFixture {
    let mut b = ProgramBuilder::new();
    let base = b.add_class("B", None);
    let a = b.add_class("A", Some(base));
    let foo = b.add_method(base, "void foo()", true);
    b.set_body(foo, None, vec![], vec![ret(None)]);

    let main = b.add_method(a, "void main()", true);
    b.set_body(
        main,
        None,
        vec![],
        vec![call_static(None, a, "void foo()", vec![]), ret(None)],
    );
    b.set_entry(main);
    InheritedStaticFixture {
        program: b.build().expect("inherited static fixture"),
        main,
        inherited: foo,
    }
}

pub struct ConstantsFixture {
    pub program: Program,
    pub main: MethodId,
    /// Variables in declaration order
    pub vars: Vec<VarId>,
}

fn int_method(names: &[&str], stmts: impl FnOnce(&[VarId]) -> Vec<Stmt>) -> ConstantsFixture {
    let mut b = ProgramBuilder::new();
    let c = b.add_class("Main", None);
    let main = b.add_method(c, "int main()", true);
    let vars: Vec<VarId> = names
        .iter()
        .map(|n| b.new_var(main, n, Type::INT))
        .collect();
    let body = stmts(&vars);
    b.set_body(main, None, vec![], body);
    b.set_entry(main);
    ConstantsFixture {
        program: b.build().expect("constants fixture"),
        main,
        vars,
    }
}

/// `a = 1; b = 2; c = a + b; return c`
pub fn fixture_sum() -> ConstantsFixture {
    int_method(&["a", "b", "c"], |v| {
        vec![
            int(v[0], 1),
            int(v[1], 2),
            binary(v[2], BinaryOp::Add, v[0], v[1]),
            ret(Some(v[2])),
        ]
    })
}

/// `x = 0; ten = 10; y = ten / x; return x`
pub fn fixture_div_by_zero() -> ConstantsFixture {
    int_method(&["x", "ten", "y"], |v| {
        vec![
            int(v[0], 0),
            int(v[1], 10),
            binary(v[2], BinaryOp::Div, v[1], v[0]),
            ret(Some(v[0])),
        ]
    })
}

/// ```text
/// 0: one = 1
/// 1: if (one == one) goto 4
/// 2: x = 2          // else
/// 3: goto 5
/// 4: x = 1          // then
/// 5: return x
/// ```
pub fn fixture_constant_branch() -> ConstantsFixture {
    int_method(&["one", "x"], |v| {
        vec![
            int(v[0], 1),
            if_goto(BinaryOp::Eq, v[0], v[0], 4),
            int(v[1], 2),
            Stmt::Goto { target: 5 },
            int(v[1], 1),
            ret(Some(v[1])),
        ]
    })
}

pub struct PolymorphicFixture {
    pub program: Program,
    pub main: MethodId,
    pub animal: ClassId,
    pub dog_speak: MethodId,
    pub cat_speak: MethodId,
    /// Result of `a.speak()` in `main`
    pub said: VarId,
    /// Statement index of the virtual call in `main`
    pub call_index: usize,
}

/// ```text
/// abstract class Animal { abstract int speak(); }
/// class Dog extends Animal { int speak() { r = 1; return r; } }
/// class Cat extends Animal { int speak() { r = 2; return r; } }
/// main() { a = new Dog(); said = a.speak(); return said; }
/// ```
pub fn fixture_polymorphic() -> PolymorphicFixture {
    let mut b = ProgramBuilder::new();
    let animal = b.add_class("Animal", None);
    b.set_abstract(animal);
    b.add_abstract_method(animal, "int speak()");

    let speak = |b: &mut ProgramBuilder, name: &str, value: i32| {
        let class = b.add_class(name, Some(animal));
        let m = b.add_method(class, "int speak()", false);
        let this = b.new_var(m, "this", Type::Class(class));
        let r = b.new_var(m, "r", Type::INT);
        b.set_body(m, Some(this), vec![], vec![int(r, value), ret(Some(r))]);
        (class, m)
    };
    let (dog, dog_speak) = speak(&mut b, "Dog", 1);
    let (_, cat_speak) = speak(&mut b, "Cat", 2);

    let main = b.add_method(animal, "int main()", true);
    let a = b.new_var(main, "a", Type::Class(animal));
    let said = b.new_var(main, "said", Type::INT);
    b.set_body(
        main,
        None,
        vec![],
        vec![
            new_obj(a, dog),
            call_virtual(Some(said), a, animal, "int speak()", vec![]),
            ret(Some(said)),
        ],
    );
    b.set_entry(main);
    PolymorphicFixture {
        program: b.build().expect("polymorphic fixture"),
        main,
        animal,
        dog_speak,
        cat_speak,
        said,
        call_index: 1,
    }
}

pub struct ArrayFixture {
    pub program: Program,
    pub main: MethodId,
    pub arr: VarId,
    pub o: VarId,
    pub r: VarId,
}

/// ```text
/// A[] id(A[] p) { return p; }
/// main() {
///   arr = new A[]; o = new A();
///   t = arr;            // or `t = A.id(arr)` when `via_call`
///   t[i] = o; r = arr[i];
/// }
/// ```
pub fn fixture_array(via_call: bool) -> ArrayFixture {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    let arr_ty = Type::array_of(Type::Class(a));

    let id = b.add_method(a, "A[] id(A[])", true);
    let p = b.new_var(id, "p", arr_ty.clone());
    b.set_body(id, None, vec![p], vec![ret(Some(p))]);

    let main = b.add_method(a, "void main()", true);
    let arr = b.new_var(main, "arr", arr_ty.clone());
    let t = b.new_var(main, "t", arr_ty);
    let o = b.new_var(main, "o", Type::Class(a));
    let r = b.new_var(main, "r", Type::Class(a));
    let i = b.new_var(main, "i", Type::INT);
    let alias = if via_call {
        call_static(Some(t), a, "A[] id(A[])", vec![arr])
    } else {
        copy(t, arr)
    };
    b.set_body(
        main,
        None,
        vec![],
        vec![
            new_array(arr, Type::Class(a)),
            new_obj(o, a),
            int(i, 0),
            alias,
            array_store(t, i, o),
            array_load(r, arr, i),
            ret(None),
        ],
    );
    b.set_entry(main);
    ArrayFixture {
        program: b.build().expect("array fixture"),
        main,
        arr,
        o,
        r,
    }
}

/// `main` passes a fresh `Node` down a chain of `depth` static methods; each
/// allocates a node, links it to its argument and forwards it.
pub fn fixture_call_chain(depth: usize) -> Program {
    let mut b = ProgramBuilder::new();
    let node = b.add_class("Node", None);
    let next = b.add_field(node, "next", Type::Class(node), false);

    let subsig = |i: usize| format!("Node link{i}(Node)");
    for i in 0..depth {
        let m = b.add_method(node, &subsig(i), true);
        let p = b.new_var(m, "p", Type::Class(node));
        let o = b.new_var(m, "o", Type::Class(node));
        let r = b.new_var(m, "r", Type::Class(node));
        let mut stmts = vec![new_obj(o, node), store(o, next, p)];
        if i + 1 < depth {
            stmts.push(call_static(Some(r), node, &subsig(i + 1), vec![o]));
        } else {
            stmts.push(load(r, o, next));
        }
        stmts.push(ret(Some(r)));
        b.set_body(m, None, vec![p], stmts);
    }

    let main = b.add_method(node, "void main()", true);
    let head = b.new_var(main, "head", Type::Class(node));
    let tail = b.new_var(main, "tail", Type::Class(node));
    let mut stmts = vec![new_obj(head, node)];
    if depth > 0 {
        stmts.push(call_static(Some(tail), node, &subsig(0), vec![head]));
    }
    stmts.push(ret(None));
    b.set_body(main, None, vec![], stmts);
    b.set_entry(main);
    b.build().expect("call chain fixture")
}
