use chip8_interp::{
    Chip8, Chip8Runner, Display, KeyEvent, LoadError, RunnerConfig, StepResult, TickResult,
    apply_key_event, u4,
};

fn assemble(program: &[u16]) -> Vec<u8> {
    program.iter().flat_map(|op| op.to_be_bytes()).collect()
}

fn load(program: &[u16]) -> Chip8 {
    let mut chip8 = Chip8::with_seed(42);
    chip8.load(&assemble(program)).unwrap();
    chip8
}

#[test]
fn call_returns_to_the_following_instruction() {
    // 0x200: CALL 0x206 / 0x202: 0000 / 0x204: 0000 / 0x206: RET
    let mut chip8 = load(&[0x2206, 0x0000, 0x0000, 0x00EE]);

    chip8.step();
    assert_eq!(chip8.stack(), &[0x202]);
    chip8.step();
    assert_eq!(chip8.pc(), 0x202);
    assert!(chip8.stack().is_empty());
}

#[test]
fn empty_rom_must_not_run() {
    let mut chip8 = Chip8::with_seed(0);
    assert_eq!(chip8.load(&[]), Err(LoadError::EmptyRom));
    assert!(!chip8.is_running());
}

#[test]
fn draws_bcd_digits_of_a_register() {
    // V0 = 137, BCD into 0x300, load the digits back and draw each glyph
    let program = [
        0x6089, // LD V0, 0x89
        0xA300, // LD I, 0x300
        0xF033, // LD B, V0
        0xF265, // LD V2, [I]
        0x6300, // LD V3, 0
        0x6400, // LD V4, 0
        0xF029, // LD F, V0
        0xD345, // DRW V3, V4, 5
        0x7305, // ADD V3, 5
        0xF129, // LD F, V1
        0xD345, // DRW V3, V4, 5
        0x7305, // ADD V3, 5
        0xF229, // LD F, V2
        0xD345, // DRW V3, V4, 5
    ];
    let mut chip8 = load(&program);

    let mut draws = 0;
    while chip8.is_running() {
        if chip8.step() == StepResult::Draw {
            draws += 1;
        }
    }

    assert_eq!(draws, 3);
    assert_eq!(&chip8.memory()[0x300..0x303], &[1, 3, 7]);
    assert_eq!(chip8.registers()[0xF], 0);
    // "1" glyph: 0x20 top row puts a single pixel at column 2
    assert!(chip8.get_display_pixel(2, 0));
    assert!(!chip8.get_display_pixel(0, 0));
    // "7" glyph bottom row is 0x40
    assert!(chip8.get_display_pixel(11, 4));
    assert!(chip8.draw_flag());
}

#[test]
fn delay_loop_counts_down() {
    // LD V0, 3 / LD DT, V0 / loop: LD V1, DT / SE V1, 0 / JP loop / LD V2, 1
    let program = [0x6003, 0xF015, 0xF107, 0x3100, 0x1204, 0x6201];
    let mut chip8 = load(&program);

    let mut steps = 0;
    while chip8.is_running() && steps < 100 {
        chip8.step();
        steps += 1;
    }

    assert!(!chip8.is_running());
    assert_eq!(chip8.registers()[2], 1);
    assert_eq!(chip8.delay_timer(), 0);
}

#[test]
fn waits_for_key_from_host_input() {
    // LD V7, K / JP self
    let mut runner = Chip8Runner::new(load(&[0xF70A, 0x1202]), RunnerConfig::default());
    let mut ignore = |_: &Display<u8>| {};

    assert_eq!(runner.tick(&mut ignore), TickResult::Running);
    assert_eq!(runner.chip8_ref().pc(), 0x200);

    apply_key_event(runner.chip8_mut().keypad_mut(), KeyEvent::Down('d'));
    runner.tick(&mut ignore);
    assert_eq!(runner.chip8_ref().registers()[7], 0xA);
    assert_eq!(runner.chip8_ref().pc(), 0x202);

    apply_key_event(runner.chip8_mut().keypad_mut(), KeyEvent::Up('x'));
    assert_eq!(runner.chip8_ref().keypad().first_down(), None);
}

#[test]
fn runner_paints_every_sprite_change() {
    // LD I, 0 / DRW V0, V0, 5 / DRW V0, V0, 5 / JP self
    let program = [0xA000, 0xD005, 0xD005, 0x1206];
    let mut runner = Chip8Runner::new(load(&program), RunnerConfig { steps_per_tick: 4 });

    let mut frames: Vec<usize> = Vec::new();
    let mut count_lit = |display: &Display<u8>| {
        frames.push(display.iter().flatten().filter(|&&p| p != 0).count());
    };

    assert_eq!(runner.tick(&mut count_lit), TickResult::Running);
    assert_eq!(frames, vec![14, 0]);
    assert_eq!(runner.chip8_ref().registers()[0xF], 1);
}

#[test]
fn skip_on_key_reads_the_pad() {
    // LD V0, 5 / SKP V0 / LD V1, 1 / LD V2, 1
    let mut chip8 = load(&[0x6005, 0xE09E, 0x6101, 0x6201]);
    chip8.keypad_mut().press(u4::new(5));

    while chip8.is_running() {
        chip8.step();
    }

    assert_eq!(chip8.registers()[1], 0);
    assert_eq!(chip8.registers()[2], 1);
}
