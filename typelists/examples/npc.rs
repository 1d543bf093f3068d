use typelists::{
    assert_arguments, get_nth_or, get_or, strong, wrap, Elements, Record, Select, Strong,
};

strong!(type Name = String;);
strong!(type X = f64;);
strong!(type Y = f64;);
strong!(type Z = f64;);
strong!(type Health = i32;);

#[derive(Debug)]
struct Npc {
    name: String,
    x: f64,
    y: f64,
    z: f64,
    hp: i32,
}

fn npc<A: Elements>(arguments: A) -> Npc {
    assert_arguments::<(String, f64, f64, f64, i32), A>();
    Npc {
        name: get_or(String::from("NPC 1"), &arguments),
        x: get_nth_or::<_, 1, _>(10.0, &arguments),
        y: get_nth_or::<_, 2, _>(1.0, &arguments),
        z: get_nth_or::<_, 3, _>(20.0, &arguments),
        hp: get_or(100, &arguments),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Player {
    name: Name,
    x: X,
    y: Y,
    z: Z,
    hp: Health,
}

wrap!(sealed Player);
strong!(type SafePlayer = Player;);

fn player<A: Elements>(arguments: A) -> SafePlayer {
    assert_arguments::<(Name, X, Y, Z, Health), A>();
    SafePlayer::new(Player {
        name: get_or(Name::new("Player 1"), &arguments),
        x: get_or(X::new(100.0), &arguments),
        y: get_or(Y::new(10.0), &arguments),
        z: get_or(Z::new(200.0), &arguments),
        hp: get_or(Health::new(100), &arguments),
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("{:?}", npc(()));
    println!("{:?}", npc((String::from("Batman"), 400, 1_000.0)));
    println!("{:?}", npc((1.0, 10_000, 0.0, String::from("Wolverine"), -1.0)));

    let mut batman = player((Health::new(400), Name::new("Batman")));
    println!("{} has {} hp at ({}, {}, {})", *batman.name, batman.hp, batman.x, batman.y, batman.z);

    let mut moved = Strong::into_inner(batman.clone());
    moved.x += 50.0;
    Strong::assign(&mut batman, moved);
    println!("{:?}", *batman);

    let mut position = Record::<(X, Y, Z)>::new((Z::new(3.0), X::new(1.0)));
    position.set(Y::new(2.0));
    println!("{position:?}");

    let names = ("Batman", String::from("Superman"));
    println!("{}", Select::<str>::at(&names, 1)?);
    if let Err(error) = Select::<str>::at(&names, 2) {
        println!("{error}");
    }

    Ok(())
}
