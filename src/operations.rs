use crate::constants::FONT_GLYPH_SIZE;
use crate::context::ExecutionContext;
use crate::error::Fault;
use crate::instruction::Instruction;

/// Executes one instruction given its decoded operands and the raw opcode.
///
/// The program counter has already been moved past the instruction, so
/// skips add another 2 and jumps overwrite it.
pub type Operation = fn(ctx: &mut ExecutionContext, args: &[u16], op: u16) -> Result<(), Fault>;

/// Selects the Operation that implements an Instruction
pub fn operation(instruction: Instruction) -> Option<Operation> {
    use Instruction::*;

    let operation: Operation = match instruction {
        ClearScreen => clr,
        Return => rts,
        Sys => return None,
        Jump => jump,
        Call => call,
        SkipEqImm => ske,
        SkipNeqImm => skne,
        SkipEqReg => skre,
        LoadImm => load,
        AddImm => add,
        LoadReg => mv,
        Or => or,
        And => and,
        Xor => xor,
        AddReg => addr,
        SubReg => sub,
        Shr => shr,
        Subn => subn,
        Shl => shl,
        SkipNeqReg => skrne,
        LoadIndex => loadi,
        JumpOffset => jumpi,
        Random => rand,
        Draw => draw,
        SkipKeyPressed => skpr,
        SkipKeyNotPressed => skup,
        LoadDelay => moved,
        WaitKey => keyd,
        SetDelay => loads,
        SetSound => ld,
        AddIndex => addi,
        LoadFont => ldspr,
        StoreBcd => bcd,
        StoreRegs => stor,
        LoadRegs => read,
    };
    Some(operation)
}

fn reg(arg: u16) -> usize {
    arg as usize
}

fn skip_if(ctx: &mut ExecutionContext, condition: bool) {
    if condition {
        ctx.registers.advance();
    }
}

/// clear
pub fn clr(ctx: &mut ExecutionContext, _args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.clear_screen();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(ctx: &mut ExecutionContext, _args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.registers.pc = ctx.registers.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.registers.pc = args[0];
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let pc = ctx.registers.pc;
    ctx.registers.push(pc)?;
    ctx.registers.pc = args[0];
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let condition = u16::from(ctx.registers.v[reg(args[0])]) == args[1];
    skip_if(ctx, condition);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let condition = u16::from(ctx.registers.v[reg(args[0])]) != args[1];
    skip_if(ctx, condition);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = ctx.registers.v;
    skip_if(ctx, v[reg(args[0])] == v[reg(args[1])]);
    Ok(())
}

/// Vx = kk
pub fn load(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.registers.v[reg(args[0])] = args[1] as u8;
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let x = reg(args[0]);
    ctx.registers.v[x] = ctx.registers.v[x].wrapping_add(args[1] as u8);
    Ok(())
}

/// Vx = Vy
pub fn mv(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = &mut ctx.registers.v;
    v[reg(args[0])] = v[reg(args[1])];
    Ok(())
}

/// Vx |= Vy
pub fn or(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = &mut ctx.registers.v;
    v[reg(args[0])] |= v[reg(args[1])];
    Ok(())
}

/// Vx &= Vy
pub fn and(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = &mut ctx.registers.v;
    v[reg(args[0])] &= v[reg(args[1])];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = &mut ctx.registers.v;
    v[reg(args[0])] ^= v[reg(args[1])];
    Ok(())
}

/// Vx += Vy; VF = overflow
pub fn addr(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = &mut ctx.registers.v;
    let (res, over) = v[reg(args[0])].overflowing_add(v[reg(args[1])]);
    v[0xF] = over as u8;
    v[reg(args[0])] = res;
    Ok(())
}

/// Vx -= Vy; VF = !underflow
pub fn sub(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = &mut ctx.registers.v;
    let (res, under) = v[reg(args[0])].overflowing_sub(v[reg(args[1])]);
    v[0xF] = !under as u8;
    v[reg(args[0])] = res;
    Ok(())
}

/// Vx >>= 1; VF = lsb
pub fn shr(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = &mut ctx.registers.v;
    let vx = v[reg(args[0])];
    v[0xF] = vx & 0x1;
    v[reg(args[0])] = vx >> 1;
    Ok(())
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = &mut ctx.registers.v;
    let (res, under) = v[reg(args[1])].overflowing_sub(v[reg(args[0])]);
    v[0xF] = !under as u8;
    v[reg(args[0])] = res;
    Ok(())
}

/// Vx <<= 1; VF = msb
pub fn shl(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = &mut ctx.registers.v;
    let vx = v[reg(args[0])];
    v[0xF] = (vx & 0x80) >> 7;
    v[reg(args[0])] = vx << 1;
    Ok(())
}

/// if Vx != Vy then pc +=2
pub fn skrne(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let v = ctx.registers.v;
    skip_if(ctx, v[reg(args[0])] != v[reg(args[1])]);
    Ok(())
}

/// I = addr
pub fn loadi(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.registers.i = args[0];
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.registers.pc = args[0] + u16::from(ctx.registers.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let rand_byte = ctx.random_byte();
    ctx.registers.v[reg(args[0])] = rand_byte & args[1] as u8;
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// Hands the n byte sprite at I to the display; VF = collision
pub fn draw(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let x = ctx.registers.v[reg(args[0])];
    let y = ctx.registers.v[reg(args[1])];
    let collision = ctx.draw_sprite(x, y, usize::from(args[2]))?;
    ctx.registers.v[0xF] = collision as u8;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let pressed = ctx.is_key_pressed(ctx.registers.v[reg(args[0])]);
    skip_if(ctx, pressed);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let pressed = ctx.is_key_pressed(ctx.registers.v[reg(args[0])]);
    skip_if(ctx, !pressed);
    Ok(())
}

/// Vx = DT
pub fn moved(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.registers.v[reg(args[0])] = ctx.registers.delay_timer;
    Ok(())
}

/// await keypress for Vx
pub fn keyd(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.wait_for_key(args[0] as u8)
}

/// DT = Vx
pub fn loads(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.registers.delay_timer = ctx.registers.v[reg(args[0])];
    Ok(())
}

/// ST = Vx
pub fn ld(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.registers.sound_timer = ctx.registers.v[reg(args[0])];
    Ok(())
}

/// I += Vx
pub fn addi(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let vx = u16::from(ctx.registers.v[reg(args[0])]);
    ctx.registers.i = ctx.registers.i.wrapping_add(vx);
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    ctx.registers.i = u16::from(ctx.registers.v[reg(args[0])]) * FONT_GLYPH_SIZE as u16;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let vx = ctx.registers.v[reg(args[0])];
    let i = usize::from(ctx.registers.i);
    ctx.memory.write(i, vx / 100)?;
    ctx.memory.write(i + 1, vx / 10 % 10)?;
    ctx.memory.write(i + 2, vx % 10)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let i = usize::from(ctx.registers.i);
    for offset in 0..=reg(args[0]) {
        ctx.memory.write(i + offset, ctx.registers.v[offset])?;
    }
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(ctx: &mut ExecutionContext, args: &[u16], _op: u16) -> Result<(), Fault> {
    let i = usize::from(ctx.registers.i);
    for offset in 0..=reg(args[0]) {
        ctx.registers.v[offset] = ctx.memory.read(i + offset)?;
    }
    Ok(())
}
