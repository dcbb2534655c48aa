use fixed_capacity_vec::FixedCapacityVec;

fn main() {
    let mut v = FixedCapacityVec::<i32, 8>::new();

    for i in 1..=5 {
        v.push(i);
    }

    println!("Vector: {:?} ({} of {})", v, v.len(), v.capacity());
    println!("Sum: {}", v.iter().sum::<i32>());

    let next = v.insert_from_slice(2, &[10, 20]);
    println!("After insert: {:?}, next position {}", v, next);

    v.erase_range(..2);
    println!("After erase_range(..2): {:?}", v);

    match v.at(10) {
        Ok(x) => println!("v[10] = {}", x),
        Err(e) => println!("Error: {}", e),
    }

    if v.try_extend_from_slice(&[0; 4]).is_none() {
        println!("Not enough room for 4 more elements");
    }

    v.retain(|x| *x % 2 == 0);
    println!("Even numbers: {:?}", v);
}
